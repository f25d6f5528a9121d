use std::collections::HashMap;

use crate::{
    constraint::{
        all_different::AllDifferent,
        linear::{LinearConstraint, Operator},
    },
    error::{Error, Result},
    model::{Csp, Domain},
    problems::Problem,
};

/// Cryptarithmetic: assign distinct digits to letters so that
/// `word1 + word2 = result` holds, e.g. SEND + MORE = MONEY.
///
/// One variable per letter over 0..=9, a global [`AllDifferent`], and a
/// single place-value [`LinearConstraint`] summing to zero. Leading
/// letters of multi-digit words have 0 removed from their domains up
/// front.
pub struct Cryptarithmetic {
    word1: String,
    word2: String,
    result: String,
}

impl Cryptarithmetic {
    pub fn new(
        word1: impl Into<String>,
        word2: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        Self {
            word1: word1.into().to_uppercase(),
            word2: word2.into().to_uppercase(),
            result: result.into().to_uppercase(),
        }
    }

    /// The classic SEND + MORE = MONEY.
    pub fn send_more_money() -> Self {
        Self::new("SEND", "MORE", "MONEY")
    }

    /// TWO + TWO = FOUR.
    pub fn two_two_four() -> Self {
        Self::new("TWO", "TWO", "FOUR")
    }

    fn words(&self) -> [&str; 3] {
        [&self.word1, &self.word2, &self.result]
    }

    /// Unique letters in order of first appearance.
    fn letters(&self) -> Result<Vec<char>> {
        let mut letters = Vec::new();
        for word in self.words() {
            if word.is_empty() {
                return Err(Error::InvalidInput("words must be non-empty".into()));
            }
            for letter in word.chars() {
                if !letter.is_ascii_uppercase() {
                    return Err(Error::InvalidInput(format!(
                        "invalid character '{}' in {}",
                        letter, word
                    )));
                }
                if !letters.contains(&letter) {
                    letters.push(letter);
                }
            }
        }
        if letters.len() > 10 {
            return Err(Error::InvalidInput(format!(
                "{} distinct letters for 10 digits",
                letters.len()
            )));
        }
        Ok(letters)
    }

    /// Net place-value coefficient per letter: positive contributions
    /// from the addends, negative from the result.
    fn coefficients(&self) -> HashMap<char, i64> {
        let mut coefficients = HashMap::new();
        for (word, sign) in [(&self.word1, 1), (&self.word2, 1), (&self.result, -1)] {
            let mut place_value = 1i64;
            for letter in word.chars().rev() {
                *coefficients.entry(letter).or_insert(0) += sign * place_value;
                place_value *= 10;
            }
        }
        coefficients
    }

    fn is_leading(&self, letter: char) -> bool {
        self.words()
            .iter()
            .any(|word| word.len() > 1 && word.starts_with(letter))
    }
}

impl Problem<i64> for Cryptarithmetic {
    fn build(&self) -> Result<Csp<i64>> {
        let letters = self.letters()?;
        let coefficients = self.coefficients();

        let mut builder = Csp::builder(format!(
            "{} + {} = {}",
            self.word1, self.word2, self.result
        ));

        let mut ids = Vec::with_capacity(letters.len());
        for &letter in &letters {
            // A leading letter never maps to 0.
            let domain = if self.is_leading(letter) {
                Domain::range(1, 9)
            } else {
                Domain::range(0, 9)
            };
            ids.push(builder.variable(letter.to_string(), domain)?);
        }

        builder.constraint(AllDifferent::named(ids.clone(), "AllDifferent"))?;

        let scope: Vec<_> = ids.iter().map(|&id| builder.get(id)).collect();
        let coeffs: Vec<i64> = letters.iter().map(|l| coefficients[l]).collect();
        let equation =
            LinearConstraint::new(&scope, &coeffs, Operator::Eq, 0)?.with_label("Equation");
        builder.constraint(equation)?;

        Ok(builder.build())
    }

    fn name(&self) -> String {
        format!("{} + {} = {}", self.word1, self.word2, self.result)
    }

    fn description(&self) -> String {
        format!(
            "Assign digits 0-9 to letters so that {} + {} = {}, each letter a unique digit.",
            self.word1, self.word2, self.result
        )
    }
}
