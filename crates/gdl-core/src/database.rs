use crate::{Clause, Symbol};
use std::collections::HashMap;

/// Clauses indexed by head relation symbol, preserving source order within
/// each relation.
#[derive(Debug, Clone, Default)]
pub struct RuleDatabase {
    by_symbol: HashMap<Symbol, Vec<Clause>>,
}

impl RuleDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Partitions a flat clause list by the symbol of each clause's head.
    pub fn build(clauses: Vec<Clause>) -> Self {
        let mut db = RuleDatabase::new();
        for clause in clauses {
            db.insert(clause);
        }
        db
    }

    pub fn insert(&mut self, clause: Clause) {
        if let Some(sym) = clause.head_symbol().cloned() {
            self.by_symbol.entry(sym).or_default().push(clause);
        }
    }

    /// Clauses for relation `r`, in source order. Empty slice if `r` is
    /// unknown to the database.
    pub fn clauses_of(&self, r: &str) -> &[Clause] {
        self.by_symbol.get(r).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.by_symbol.keys()
    }

    pub fn contains(&self, r: &str) -> bool {
        self.by_symbol.contains_key(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Term;

    #[test]
    fn partitions_by_head_symbol() {
        let db = RuleDatabase::build(vec![
            Clause::fact(Term::compound("role", vec![Term::atom("robot")])),
            Clause::fact(Term::compound("base", vec![Term::atom("p")])),
            Clause::fact(Term::compound("base", vec![Term::atom("q")])),
        ]);
        assert_eq!(db.clauses_of("role").len(), 1);
        assert_eq!(db.clauses_of("base").len(), 2);
        assert_eq!(db.clauses_of("missing").len(), 0);
    }

    #[test]
    fn preserves_source_order() {
        let db = RuleDatabase::build(vec![
            Clause::fact(Term::compound("input", vec![Term::atom("robot"), Term::atom("a")])),
            Clause::fact(Term::compound("input", vec![Term::atom("robot"), Term::atom("b")])),
        ]);
        let clauses = db.clauses_of("input");
        assert_eq!(clauses[0].head.args()[1], Term::atom("a"));
        assert_eq!(clauses[1].head.args()[1], Term::atom("b"));
    }
}
