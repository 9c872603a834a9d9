use std::io::Write;

use super::Aig;
use super::AigLiteral;
use super::AigNode;

impl Aig {
    /// Write the graph in the ASCII AIGER format (`aag`).
    ///
    /// Inputs are numbered first, in input order, followed by the AND gates in node order.
    pub fn write_aag(&self, mut writer: impl Write) -> std::io::Result<()> {
        let mut aiger_variables = vec![0_u32; self.nodes.len()];
        let mut next_variable = 1;

        for &input in &self.inputs {
            aiger_variables[input.node()] = next_variable;
            next_variable += 1;
        }
        for (node, kind) in self.nodes.iter().enumerate() {
            if matches!(kind, AigNode::And(..)) {
                aiger_variables[node] = next_variable;
                next_variable += 1;
            }
        }

        let aiger_literal = |literal: AigLiteral| {
            aiger_variables[literal.node()] * 2 + u32::from(literal.is_complemented())
        };

        writeln!(
            writer,
            "aag {} {} 0 {} {}",
            next_variable - 1,
            self.inputs.len(),
            usize::from(self.output.is_some()),
            self.num_ands()
        )?;

        for &input in &self.inputs {
            writeln!(writer, "{}", aiger_literal(input))?;
        }

        if let Some(output) = self.output {
            writeln!(writer, "{}", aiger_literal(output))?;
        }

        for (node, kind) in self.nodes.iter().enumerate() {
            if let AigNode::And(a, b) = *kind {
                let (a, b) = (aiger_literal(a), aiger_literal(b));
                writeln!(
                    writer,
                    "{} {} {}",
                    aiger_variables[node] * 2,
                    a.max(b),
                    a.min(b)
                )?;
            }
        }

        Ok(())
    }

    /// The graph in the ASCII AIGER format.
    pub fn to_aag_string(&self) -> String {
        let mut buffer = Vec::new();
        self.write_aag(&mut buffer)
            .expect("writing to a vector does not fail");
        String::from_utf8(buffer).expect("the AIGER text is ASCII")
    }
}
