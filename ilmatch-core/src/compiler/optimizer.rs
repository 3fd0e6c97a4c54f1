use alloc::vec::Vec;

use crate::{
    pattern::{
        ExpressionPattern,
        OwnedExpressionPattern,
    },
    Atom,
};

struct Optimizer<'a> {
    pattern: &'a dyn ExpressionPattern,
    atoms: Vec<Atom>,
}

impl<'a> Optimizer<'a> {
    pub fn new(pattern: &'a dyn ExpressionPattern) -> Self {
        Self {
            pattern,
            atoms: pattern.atoms().to_vec(),
        }
    }

    pub fn optimize(mut self) -> OwnedExpressionPattern {
        while self.atoms.len() > 1 {
            if self.join_literals() {
                continue;
            }

            /* finished optimizing */
            break;
        }

        OwnedExpressionPattern::new(
            self.atoms,
            self.pattern.literal_text().into(),
            self.pattern.source().into(),
        )
    }

    fn iter_merge_pair(&mut self, merger: impl Fn(&Atom, &Atom) -> Option<Atom>) -> bool {
        let mut updated = false;
        let mut index = 0;
        while index + 1 < self.atoms.len() {
            let left = &self.atoms[index];
            let right = &self.atoms[index + 1];

            if let Some(new) = merger(left, right) {
                self.atoms[index] = new;
                self.atoms.remove(index + 1);
                updated = true;
            } else {
                index += 1;
            }
        }

        updated
    }

    fn join_literals(&mut self) -> bool {
        self.iter_merge_pair(|left, right| {
            let Atom::Literal {
                text_start: left_start,
                text_end: left_end,
            } = *left
            else {
                return None;
            };

            let Atom::Literal {
                text_start: right_start,
                text_end: right_end,
            } = *right
            else {
                return None;
            };

            if left_end == right_start {
                Some(Atom::Literal {
                    text_start: left_start,
                    text_end: right_end,
                })
            } else {
                None
            }
        })
    }
}

/// Optimize an [ExpressionPattern] to increase matching performance.  
/// Adjacent literals are joined into a single literal, which also
/// gives the matcher a longer text to search for.
pub fn optimize_pattern(pattern: &dyn ExpressionPattern) -> OwnedExpressionPattern {
    let optimizer = Optimizer::new(pattern);
    optimizer.optimize()
}

#[cfg(test)]
mod test {
    use crate::{
        pattern::{
            ExpressionPattern,
            OwnedExpressionPattern,
        },
        Atom,
    };

    fn test_optimize(input: &[Atom], expected: &[Atom]) {
        println!("Testing: {:?}", input);
        let result = super::optimize_pattern(&OwnedExpressionPattern::new(
            input.to_vec(),
            "ABCDEF".into(),
            "".into(),
        ));
        assert_eq!(result.atoms(), expected);
        println!(" -> success");
    }

    #[test]
    fn test_empty() {
        test_optimize(&[], &[]);
        test_optimize(&[Atom::Capture], &[Atom::Capture]);
    }

    #[test]
    fn test_literals() {
        test_optimize(
            &[
                Atom::Literal {
                    text_start: 0,
                    text_end: 1,
                },
                Atom::Literal {
                    text_start: 1,
                    text_end: 3,
                },
                Atom::Literal {
                    text_start: 3,
                    text_end: 4,
                },
            ],
            &[Atom::Literal {
                text_start: 0,
                text_end: 4,
            }],
        );

        /* non contiguous text must not be joined */
        test_optimize(
            &[
                Atom::Literal {
                    text_start: 0,
                    text_end: 1,
                },
                Atom::Literal {
                    text_start: 2,
                    text_end: 3,
                },
            ],
            &[
                Atom::Literal {
                    text_start: 0,
                    text_end: 1,
                },
                Atom::Literal {
                    text_start: 2,
                    text_end: 3,
                },
            ],
        );
    }

    #[test]
    fn test_wildcard_barrier() {
        test_optimize(
            &[
                Atom::Literal {
                    text_start: 0,
                    text_end: 2,
                },
                Atom::Capture,
                Atom::Literal {
                    text_start: 2,
                    text_end: 3,
                },
                Atom::Literal {
                    text_start: 3,
                    text_end: 5,
                },
                Atom::Wildcard,
            ],
            &[
                Atom::Literal {
                    text_start: 0,
                    text_end: 2,
                },
                Atom::Capture,
                Atom::Literal {
                    text_start: 2,
                    text_end: 5,
                },
                Atom::Wildcard,
            ],
        );
    }

    #[test]
    fn test_compiled_pattern() {
        let pattern = crate::compiler::compile_pattern("F(??, ..)").unwrap();
        assert_eq!(
            pattern.atoms(),
            &[
                Atom::Literal {
                    text_start: 0,
                    text_end: 2
                },
                Atom::Capture,
                Atom::Literal {
                    text_start: 2,
                    text_end: 4
                },
                Atom::Wildcard,
                Atom::Literal {
                    text_start: 4,
                    text_end: 5
                },
            ]
        );
    }
}
