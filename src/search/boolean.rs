//! Boolean query evaluation / 布尔查询
//!
//! Grammar: whitespace separated `AND`, `OR`, `NOT` and terms, evaluated in a
//! single left-to-right pass. There is no precedence and no grouping: an
//! operand stack plus one pending operator is the whole machine.

use std::collections::HashSet;

use super::schema::InvertedIndex;
use super::tokenizer::stem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    And,
    Or,
}

/// Evaluate a boolean query against the inverted index / 计算布尔查询
pub fn evaluate(
    query: &str,
    inverted: &InvertedIndex,
    all_docs: &HashSet<String>,
    stopwords: &HashSet<String>,
) -> HashSet<String> {
    let tokens: Vec<&str> = query.split_whitespace().collect();
    let mut stack: Vec<HashSet<String>> = Vec::new();
    let mut pending: Option<Operator> = None;

    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            "AND" => {
                pending = Some(Operator::And);
                i += 1;
            }
            "OR" => {
                pending = Some(Operator::Or);
                i += 1;
            }
            "NOT" => {
                // NOT consumes the next token; a dangling NOT voids the query
                let Some(word) = tokens.get(i + 1) else {
                    return HashSet::new();
                };
                let term = stem(&word.to_lowercase());
                let docs = if stopwords.contains(&term) {
                    HashSet::new()
                } else {
                    match inverted.get(&term) {
                        Some(hits) => all_docs.difference(hits).cloned().collect(),
                        None => all_docs.clone(),
                    }
                };
                stack.push(docs);
                i += 2;
            }
            word => {
                let docs = lookup(word, inverted, stopwords);
                let docs = match (pending, stack.pop()) {
                    (Some(op), Some(left)) => {
                        pending = None;
                        combine(op, left, docs)
                    }
                    (_, left) => {
                        stack.extend(left);
                        docs
                    }
                };
                stack.push(docs);
                i += 1;
            }
        }
    }

    // Bottom of the stack is the first operand chain / 取栈底
    stack.into_iter().next().unwrap_or_default()
}

fn lookup(word: &str, inverted: &InvertedIndex, stopwords: &HashSet<String>) -> HashSet<String> {
    let term = stem(&word.to_lowercase());
    if stopwords.contains(&term) {
        return HashSet::new();
    }
    inverted.get(&term).cloned().unwrap_or_default()
}

fn combine(op: Operator, left: HashSet<String>, right: HashSet<String>) -> HashSet<String> {
    match op {
        Operator::And => left.intersection(&right).cloned().collect(),
        Operator::Or => {
            let mut union = left;
            union.extend(right);
            union
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn fixture() -> (InvertedIndex, HashSet<String>) {
        let mut inverted = InvertedIndex::new();
        inverted.insert("cat".into(), set(&["1", "2"]));
        inverted.insert("dog".into(), set(&["2", "3"]));
        inverted.insert("bird".into(), set(&["4"]));
        (inverted, set(&["1", "2", "3", "4"]))
    }

    fn eval(query: &str) -> HashSet<String> {
        let (inverted, all) = fixture();
        evaluate(query, &inverted, &all, &HashSet::new())
    }

    #[test]
    fn test_and() {
        assert_eq!(eval("cat AND dog"), set(&["2"]));
    }

    #[test]
    fn test_or() {
        assert_eq!(eval("cat OR dog"), set(&["1", "2", "3"]));
    }

    #[test]
    fn test_not() {
        let mut inverted = InvertedIndex::new();
        inverted.insert("cat".into(), set(&["1"]));
        let result = evaluate("NOT cat", &inverted, &set(&["1", "2", "3"]), &HashSet::new());
        assert_eq!(result, set(&["2", "3"]));
    }

    #[test]
    fn test_not_unseen_term_is_everything() {
        assert_eq!(eval("NOT zebra"), set(&["1", "2", "3", "4"]));
    }

    #[test]
    fn test_terms_are_case_folded_and_stemmed() {
        assert_eq!(eval("Cats AND DOGS"), set(&["2"]));
    }

    #[test]
    fn test_operators_are_case_sensitive() {
        // lowercase "and" is just another term, never an operator
        assert_eq!(eval("cat and dog"), set(&["1", "2"]));
    }

    #[test]
    fn test_left_to_right_without_precedence() {
        // (cat OR dog) AND bird
        assert_eq!(eval("cat OR dog AND bird"), HashSet::new());
        // (cat AND dog) OR bird
        assert_eq!(eval("cat AND dog OR bird"), set(&["2", "4"]));
    }

    #[test]
    fn test_dangling_not_is_empty() {
        assert_eq!(eval("cat OR NOT"), HashSet::new());
        assert_eq!(eval("NOT"), HashSet::new());
    }

    #[test]
    fn test_empty_and_lone_operator() {
        assert_eq!(eval(""), HashSet::new());
        assert_eq!(eval("   "), HashSet::new());
        assert_eq!(eval("AND"), HashSet::new());
    }

    #[test]
    fn test_leading_operator_with_empty_stack_pushes_operand() {
        assert_eq!(eval("OR cat"), set(&["1", "2"]));
    }

    #[test]
    fn test_latest_operator_wins() {
        assert_eq!(eval("cat AND OR dog"), set(&["1", "2", "3"]));
        assert_eq!(eval("cat OR AND dog"), set(&["2"]));
    }

    #[test]
    fn test_adjacent_terms_keep_first_operand() {
        assert_eq!(eval("bird cat"), set(&["4"]));
    }

    #[test]
    fn test_not_does_not_consume_pending_operator() {
        // NOT result is pushed beside "cat"; the final answer is the bottom value
        assert_eq!(eval("cat AND NOT dog"), set(&["1", "2"]));
        // the still-pending AND folds "bird" into the NOT value
        assert_eq!(eval("cat AND NOT dog bird"), set(&["1", "2"]));
        assert_eq!(eval("NOT dog OR bird"), set(&["1", "4"]));
    }

    #[test]
    fn test_stopwords_suppress_term_and_complement() {
        let (inverted, all) = fixture();
        let stop = set(&["cat"]);
        assert_eq!(evaluate("cat", &inverted, &all, &stop), HashSet::new());
        assert_eq!(evaluate("NOT cat", &inverted, &all, &stop), HashSet::new());
        assert_eq!(evaluate("cat OR dog", &inverted, &all, &stop), set(&["2", "3"]));
    }
}
