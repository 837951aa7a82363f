// TF-IDF vectorization over a small corpus of items.
//
// Each item is one document. Term frequency is normalized by the document's
// own most frequent term, and inverse document frequency is smoothed:
//
//   tf(t, d) = count(t, d) / max_count(d)
//   idf(t)   = ln(N / (df(t) + 1)) + 1
//
// Vectors live in a shared, alphabetically sorted term space so that two runs
// over the same documents produce identical vectors.

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Vectors for every document in a corpus, over a sorted vocabulary.
#[derive(Debug, Clone)]
pub struct DocumentVectors {
    /// Sorted term space; `vectors[d][i]` is the weight of `vocabulary[i]` in document d
    pub vocabulary: Vec<String>,
    pub vectors: Vec<Vec<f64>>,
}

impl DocumentVectors {
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Sum each term's weight over the given documents and return the `n`
    /// strongest terms. Ties are broken alphabetically.
    pub fn top_terms(&self, docs: &[usize], n: usize) -> Vec<String> {
        let mut totals = vec![0.0f64; self.vocabulary.len()];
        for &d in docs {
            for (total, weight) in totals.iter_mut().zip(&self.vectors[d]) {
                *total += weight;
            }
        }

        let mut ranked: Vec<(usize, f64)> = totals
            .into_iter()
            .enumerate()
            .filter(|(_, score)| *score > 0.0)
            .collect();
        // Vocabulary is sorted, so index order is alphabetical order
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        ranked
            .into_iter()
            .take(n)
            .map(|(i, _)| self.vocabulary[i].clone())
            .collect()
    }
}

/// Max-normalized term frequencies for one tokenized document.
pub fn term_frequencies(tokens: &[String]) -> HashMap<&str, f64> {
    let mut counts: HashMap<&str, f64> = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0.0) += 1.0;
    }
    let max = counts.values().copied().fold(0.0, f64::max);
    if max > 0.0 {
        for count in counts.values_mut() {
            *count /= max;
        }
    }
    counts
}

/// Smoothed inverse document frequency for every term in the corpus.
pub fn inverse_document_frequencies(docs: &[Vec<String>]) -> BTreeMap<String, f64> {
    let mut doc_counts: BTreeMap<String, usize> = BTreeMap::new();
    for doc in docs {
        let unique: BTreeSet<&String> = doc.iter().collect();
        for term in unique {
            *doc_counts.entry(term.clone()).or_insert(0) += 1;
        }
    }

    let n = docs.len() as f64;
    doc_counts
        .into_iter()
        .map(|(term, df)| {
            let idf = (n / (df as f64 + 1.0)).ln() + 1.0;
            (term, idf)
        })
        .collect()
}

/// Build TF-IDF vectors for a tokenized corpus.
pub fn vectorize(docs: &[Vec<String>]) -> DocumentVectors {
    let idf = inverse_document_frequencies(docs);
    let vocabulary: Vec<String> = idf.keys().cloned().collect();
    let index: HashMap<&str, usize> = vocabulary
        .iter()
        .enumerate()
        .map(|(i, term)| (term.as_str(), i))
        .collect();

    let vectors = docs
        .iter()
        .map(|doc| {
            let mut vector = vec![0.0; vocabulary.len()];
            for (term, tf) in term_frequencies(doc) {
                if let Some(&i) = index.get(term) {
                    vector[i] = tf * idf[term];
                }
            }
            vector
        })
        .collect();

    DocumentVectors {
        vocabulary,
        vectors,
    }
}
