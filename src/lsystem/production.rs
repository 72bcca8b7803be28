//! Context-free rewriting of whitespace separated tokens.

use std::collections::HashMap;

// -------------------------------------------------------------------------------------------------

/// Replacement strings for tokens.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleTable {
    rules: HashMap<String, String>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rule for the given token.
    pub fn add_rule<T: Into<String>, R: Into<String>>(&mut self, token: T, replacement: R) {
        self.rules.insert(token.into(), replacement.into());
    }

    /// Replacement for the given token, if any.
    pub fn replacement(&self, token: &str) -> Option<&str> {
        self.rules.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T: Into<String>, R: Into<String>> FromIterator<(T, R)> for RuleTable {
    fn from_iter<I: IntoIterator<Item = (T, R)>>(iter: I) -> Self {
        let mut rules = Self::new();
        for (token, replacement) in iter {
            rules.add_rule(token, replacement);
        }
        rules
    }
}

// -------------------------------------------------------------------------------------------------

/// Rewrite the axiom for the given number of generations.
///
/// Each generation replaces every token which has a rule with the rule's replacement and keeps
/// all other tokens. Tokens in the result are separated by single spaces.
///
/// The size of the production is not limited: rules which grow the production, grow it
/// exponentially with the number of generations.
pub fn produce(axiom: &str, rules: &RuleTable, generations: usize) -> String {
    let mut production = axiom.split_whitespace().collect::<Vec<_>>().join(" ");
    for generation in 0..generations {
        let mut next = String::with_capacity(production.len());
        for token in production.split_whitespace() {
            let replacement = rules.replacement(token).unwrap_or(token);
            for word in replacement.split_whitespace() {
                if !next.is_empty() {
                    next.push(' ');
                }
                next.push_str(word);
            }
        }
        log::debug!(
            "Generation {}: production has {} characters",
            generation + 1,
            next.len()
        );
        production = next;
    }
    production
}

// -------------------------------------------------------------------------------------------------
