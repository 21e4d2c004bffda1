use crate::{Clause, Lit, Var};
use anyhow::Context;
use std::io::{Read, Write};
use varisat_formula::{CnfFormula, ExtendFormula};

/// A conjunction of clauses over the variables `1..=num_vars`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cnf {
    pub num_vars: u32,
    pub clauses: Vec<Clause>,
}

impl Cnf {
    pub fn new() -> Self {
        Cnf {
            num_vars: 0,
            clauses: Vec::new(),
        }
    }

    /// Creates an empty formula that declares `num_vars` variables, even if some of them
    /// never appear in a clause.
    pub fn with_num_vars(num_vars: u32) -> Self {
        Cnf {
            num_vars,
            clauses: Vec::new(),
        }
    }

    pub fn add_clause(&mut self, lits: &[Lit]) {
        lits.iter().for_each(|l| {
            self.num_vars = self.num_vars.max(l.var().get());
        });
        self.clauses.push(Clause::from(lits));
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    fn to_formula(&self) -> CnfFormula {
        let mut formula = CnfFormula::new();
        formula.set_var_count(self.num_vars as usize);
        let mut lits = Vec::new();
        for clause in &self.clauses {
            lits.clear();
            lits.extend(
                clause
                    .iter()
                    .map(|l| varisat_formula::Lit::from_dimacs(l.to_dimacs() as isize)),
            );
            formula.add_clause(&lits);
        }
        formula
    }

    /// Writes the formula in DIMACS CNF format (`p cnf <vars> <clauses>` header).
    pub fn write_dimacs(&self, out: &mut impl Write) -> std::io::Result<()> {
        varisat_dimacs::write_dimacs(out, &self.to_formula())
    }

    /// Reads a formula in DIMACS CNF format.
    pub fn read_dimacs(input: impl Read) -> anyhow::Result<Cnf> {
        let formula = varisat_dimacs::DimacsParser::parse(input)?;
        let num_vars = u32::try_from(formula.var_count()).context("Too many variables")?;
        let mut cnf = Cnf::with_num_vars(num_vars);
        for clause in formula.iter() {
            let lits = clause
                .iter()
                .map(|l| {
                    let var = Var::new(l.var().index() as u32 + 1).context("Invalid variable")?;
                    Ok(Lit::new(var, l.is_positive()))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            cnf.add_clause(&lits);
        }
        Ok(cnf)
    }
}
