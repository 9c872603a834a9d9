//! A small and-inverter graph (AIG) in which circuit interpolants are built.
//!
//! Node 0 is the constant false. Edges are [`AigLiteral`]s, which may be complemented. AND nodes
//! are structurally hashed, so building the same gate twice yields the same literal.
mod aiger;

use std::ops::Not;

use crate::containers::HashMap;

/// A possibly complemented reference to a node of an [`Aig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AigLiteral {
    code: u32,
}

impl AigLiteral {
    pub const FALSE: AigLiteral = AigLiteral { code: 0 };
    pub const TRUE: AigLiteral = AigLiteral { code: 1 };

    fn new(node: usize, is_complemented: bool) -> AigLiteral {
        AigLiteral {
            code: node as u32 * 2 + u32::from(is_complemented),
        }
    }

    pub fn node(self) -> usize {
        (self.code / 2) as usize
    }

    pub fn is_complemented(self) -> bool {
        self.code & 1 == 1
    }

    pub fn is_constant(self) -> bool {
        self.node() == 0
    }
}

impl Not for AigLiteral {
    type Output = AigLiteral;

    fn not(self) -> AigLiteral {
        AigLiteral {
            code: self.code ^ 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AigNode {
    Constant,
    /// The primary input with the given index.
    Input(u32),
    And(AigLiteral, AigLiteral),
}

/// An and-inverter graph with a single (optional) output.
///
/// Nodes are only ever appended and an AND node only refers to earlier nodes, so the node order is
/// a topological order.
#[derive(Clone, Debug)]
pub struct Aig {
    nodes: Vec<AigNode>,
    inputs: Vec<AigLiteral>,
    structural_hash: HashMap<(AigLiteral, AigLiteral), AigLiteral>,
    output: Option<AigLiteral>,
}

impl Default for Aig {
    fn default() -> Self {
        Aig {
            nodes: vec![AigNode::Constant],
            inputs: vec![],
            structural_hash: HashMap::default(),
            output: None,
        }
    }
}

impl Aig {
    /// Create a graph with `num_inputs` primary inputs and no gates.
    pub fn with_inputs(num_inputs: u32) -> Aig {
        let mut aig = Aig::default();
        for _ in 0..num_inputs {
            let _ = aig.add_input();
        }
        aig
    }

    pub fn add_input(&mut self) -> AigLiteral {
        let literal = AigLiteral::new(self.nodes.len(), false);
        self.nodes.push(AigNode::Input(self.inputs.len() as u32));
        self.inputs.push(literal);
        literal
    }

    pub fn input(&self, index: u32) -> AigLiteral {
        self.inputs[index as usize]
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_ands(&self) -> usize {
        self.nodes.len() - 1 - self.inputs.len()
    }

    pub fn nodes(&self) -> &[AigNode] {
        &self.nodes
    }

    pub fn output(&self) -> Option<AigLiteral> {
        self.output
    }

    pub fn set_output(&mut self, literal: AigLiteral) {
        self.output = Some(literal);
    }

    pub fn and(&mut self, a: AigLiteral, b: AigLiteral) -> AigLiteral {
        let (a, b) = if a <= b { (a, b) } else { (b, a) };

        if a == AigLiteral::FALSE || a == !b {
            return AigLiteral::FALSE;
        }
        if a == AigLiteral::TRUE || a == b {
            return b;
        }

        if let Some(&literal) = self.structural_hash.get(&(a, b)) {
            return literal;
        }

        let literal = AigLiteral::new(self.nodes.len(), false);
        self.nodes.push(AigNode::And(a, b));
        let _ = self.structural_hash.insert((a, b), literal);
        literal
    }

    pub fn or(&mut self, a: AigLiteral, b: AigLiteral) -> AigLiteral {
        !self.and(!a, !b)
    }

    /// `select ? then : otherwise`
    pub fn mux(&mut self, select: AigLiteral, then: AigLiteral, otherwise: AigLiteral) -> AigLiteral {
        if then == otherwise {
            return then;
        }

        let then = self.and(select, then);
        let otherwise = self.and(!select, otherwise);
        self.or(then, otherwise)
    }

    /// Evaluate `literal` under the given values of the primary inputs.
    pub fn evaluate(&self, literal: AigLiteral, inputs: &[bool]) -> bool {
        let mut values = Vec::with_capacity(literal.node() + 1);

        for node in &self.nodes[..=literal.node()] {
            let value = match *node {
                AigNode::Constant => false,
                AigNode::Input(index) => inputs[index as usize],
                AigNode::And(a, b) => {
                    let value_of = |edge: AigLiteral| values[edge.node()] != edge.is_complemented();
                    value_of(a) && value_of(b)
                }
            };
            values.push(value);
        }

        values[literal.node()] != literal.is_complemented()
    }

    /// Copy the cone of `root` into a new graph with the same inputs, and make it the output.
    pub fn cleanup(&self, root: AigLiteral) -> Aig {
        let mut in_cone = vec![false; self.nodes.len()];
        let mut stack = vec![root.node()];

        while let Some(node) = stack.pop() {
            if in_cone[node] {
                continue;
            }
            in_cone[node] = true;

            if let AigNode::And(a, b) = self.nodes[node] {
                stack.push(a.node());
                stack.push(b.node());
            }
        }

        let mut compact = Aig::with_inputs(self.inputs.len() as u32);
        let mut translated = vec![AigLiteral::FALSE; self.nodes.len()];
        let translate = |translated: &[AigLiteral], edge: AigLiteral| {
            let literal = translated[edge.node()];
            if edge.is_complemented() {
                !literal
            } else {
                literal
            }
        };

        for (node, &kind) in self.nodes.iter().enumerate() {
            translated[node] = match kind {
                AigNode::Constant => AigLiteral::FALSE,
                AigNode::Input(index) => compact.input(index),
                AigNode::And(a, b) if in_cone[node] => {
                    let a = translate(&translated, a);
                    let b = translate(&translated, b);
                    compact.and(a, b)
                }
                AigNode::And(..) => continue,
            };
        }

        compact.set_output(translate(&translated, root));
        compact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_and_trivial_gates_are_simplified() {
        let mut aig = Aig::with_inputs(1);
        let x = aig.input(0);

        assert_eq!(AigLiteral::FALSE, aig.and(x, AigLiteral::FALSE));
        assert_eq!(x, aig.and(AigLiteral::TRUE, x));
        assert_eq!(x, aig.and(x, x));
        assert_eq!(AigLiteral::FALSE, aig.and(x, !x));
        assert_eq!(AigLiteral::TRUE, aig.or(x, !x));
        assert_eq!(0, aig.num_ands());
    }

    #[test]
    fn structural_hashing_reuses_gates() {
        let mut aig = Aig::with_inputs(2);
        let x = aig.input(0);
        let y = aig.input(1);

        let first = aig.and(x, !y);
        let second = aig.and(!y, x);

        assert_eq!(first, second);
        assert_eq!(1, aig.num_ands());
    }

    #[test]
    fn mux_selects_by_the_first_argument() {
        let mut aig = Aig::with_inputs(3);
        let (s, t, e) = (aig.input(0), aig.input(1), aig.input(2));
        let mux = aig.mux(s, t, e);

        for assignment in 0..8u32 {
            let inputs: Vec<bool> = (0..3).map(|bit| (assignment >> bit) & 1 == 1).collect();
            let expected = if inputs[0] { inputs[1] } else { inputs[2] };
            assert_eq!(expected, aig.evaluate(mux, &inputs));
        }
    }

    #[test]
    fn cleanup_keeps_only_the_cone_of_the_root() {
        let mut aig = Aig::with_inputs(3);
        let (x, y, z) = (aig.input(0), aig.input(1), aig.input(2));
        let _unused = aig.and(y, z);
        let root = aig.or(x, y);

        let compact = aig.cleanup(root);

        assert_eq!(3, compact.num_inputs());
        assert_eq!(1, compact.num_ands());
        let output = compact.output().unwrap();
        for assignment in 0..8u32 {
            let inputs: Vec<bool> = (0..3).map(|bit| (assignment >> bit) & 1 == 1).collect();
            assert_eq!(aig.evaluate(root, &inputs), compact.evaluate(output, &inputs));
        }
    }

    #[test]
    fn cleanup_of_a_constant_has_no_gates() {
        let aig = Aig::with_inputs(2);

        let compact = aig.cleanup(AigLiteral::TRUE);

        assert_eq!(0, compact.num_ands());
        assert_eq!(Some(AigLiteral::TRUE), compact.output());
    }
}
