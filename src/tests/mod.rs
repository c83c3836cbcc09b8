//! Synthetic genes, transcripts and reference sequences to be used in
//! unit tests, doc tests and benchmarks
