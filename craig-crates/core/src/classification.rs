//! Labels every variable of a [`ClauseStore`] by the partitions its root occurrences belong to.
use crate::containers::KeyedVec;
use crate::craig_assert_advanced;
use crate::ClauseStore;
use crate::ClauseStoreError;
use crate::Side;
use crate::Variable;

/// The class of a variable with respect to the A/B partition of the root clauses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariableClass {
    /// The variable only occurs in roots of A.
    AOnly,
    /// The variable only occurs in roots of B.
    BOnly,
    /// The variable occurs in roots of both sides. The payload is its dense index among the
    /// global variables.
    Global(u32),
    /// The variable does not occur in any root clause. For interpolation it is treated like a
    /// variable local to B.
    Unused,
}

/// The classification of all variables of a store; see [`classify`].
#[derive(Clone, Debug, Default)]
pub struct VariableClassification {
    classes: KeyedVec<Variable, VariableClass>,
    global_variables: Vec<Variable>,
}

impl VariableClassification {
    pub fn class(&self, variable: Variable) -> VariableClass {
        self.classes
            .get(variable)
            .copied()
            .unwrap_or(VariableClass::Unused)
    }

    /// The global variables, ordered by their global index.
    pub fn global_variables(&self) -> &[Variable] {
        &self.global_variables
    }

    pub fn num_global_variables(&self) -> usize {
        self.global_variables.len()
    }

    pub fn global_index(&self, variable: Variable) -> Option<u32> {
        match self.class(variable) {
            VariableClass::Global(index) => Some(index),
            _ => None,
        }
    }
}

/// Classify the variables of `store`.
///
/// Variables of the A-roots are marked first. Scanning the B-roots in order, a variable that was
/// seen in A becomes global and receives the next free global index; the remaining variables of B
/// are B-only.
pub fn classify(store: &ClauseStore) -> Result<VariableClassification, ClauseStoreError> {
    store.validate_partition()?;

    let mut classes = KeyedVec::default();
    classes.resize(store.num_variables() as usize, VariableClass::Unused);

    for (_, clause) in store.roots_of(Side::A) {
        for literal in clause.literals() {
            classes[literal.variable()] = VariableClass::AOnly;
        }
    }

    let mut global_variables = vec![];
    for (_, clause) in store.roots_of(Side::B) {
        for literal in clause.literals() {
            let variable = literal.variable();

            match classes[variable] {
                VariableClass::AOnly => {
                    classes[variable] = VariableClass::Global(global_variables.len() as u32);
                    global_variables.push(variable);
                }
                VariableClass::Unused => classes[variable] = VariableClass::BOnly,
                VariableClass::BOnly | VariableClass::Global(_) => {}
            }
        }
    }

    craig_assert_advanced!(global_variables
        .iter()
        .enumerate()
        .all(|(index, &variable)| classes[variable] == VariableClass::Global(index as u32)));

    Ok(VariableClassification {
        classes,
        global_variables,
    })
}
