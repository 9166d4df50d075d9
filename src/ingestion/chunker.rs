//! Token-bounded chunking with overlap
//!
//! Both strategies operate independently per input segment and never merge
//! text across segments, so every chunk's starting pointer is well-defined.

use serde::{Deserialize, Serialize};

use crate::config::ChunkingConfig;
use crate::types::{ChunkResult, ParseResult};

/// Estimate a token count as `ceil(chars / 4)`
///
/// A cheap, deterministic proxy. It is used for every token count in the
/// crate (chunk budgets, recorded counts, embedding results) so chunk
/// boundaries stay reproducible.
pub fn estimate_token_count(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Split text into sentences on `.`, `!`, or `?` followed by whitespace
///
/// The terminator stays with its sentence; the separating whitespace is
/// consumed. Spans that are empty after trimming are dropped.
fn split_into_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        match chars.peek() {
            Some(&(_, next)) if next.is_whitespace() => {}
            _ => continue,
        }
        let end = i + c.len_utf8();
        if !text[start..end].trim().is_empty() {
            sentences.push(&text[start..end]);
        }
        start = end;
        while let Some(&(j, w)) = chars.peek() {
            if !w.is_whitespace() {
                break;
            }
            chars.next();
            start = j + w.len_utf8();
        }
    }

    if !text[start..].trim().is_empty() {
        sentences.push(&text[start..]);
    }
    sentences
}

/// Options controlling chunk boundaries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkingOptions {
    /// Hard upper bound on estimated tokens per chunk
    pub max_tokens: usize,
    /// Desired token overlap carried into the next chunk
    pub overlap_tokens: usize,
    /// Whether sentence boundaries must not be split
    pub preserve_sentences: bool,
}

impl Default for ChunkingOptions {
    fn default() -> Self {
        Self {
            max_tokens: 512,
            overlap_tokens: 50,
            preserve_sentences: true,
        }
    }
}

impl From<&ChunkingConfig> for ChunkingOptions {
    fn from(config: &ChunkingConfig) -> Self {
        Self {
            max_tokens: config.max_tokens,
            overlap_tokens: config.overlap_tokens,
            preserve_sentences: config.preserve_sentences,
        }
    }
}

/// A chunking strategy: a pure, synchronous function of its inputs
pub trait ChunkingStrategy: Send + Sync {
    fn chunk(&self, parse: &ParseResult, options: &ChunkingOptions) -> Vec<ChunkResult>;
}

/// Default strategy: greedy sentence accumulation with sentence-level overlap
///
/// Sentences longer than `max_tokens` are not split further; the chunk
/// holding only that sentence may exceed the nominal bound.
pub struct SentenceChunker;

impl ChunkingStrategy for SentenceChunker {
    fn chunk(&self, parse: &ParseResult, options: &ChunkingOptions) -> Vec<ChunkResult> {
        let mut results = Vec::new();

        for segment in &parse.segments {
            let sentences = split_into_sentences(&segment.text);
            let mut current: Vec<&str> = Vec::new();
            let mut current_tokens = 0usize;

            for sentence in sentences {
                let sentence_tokens = estimate_token_count(sentence);

                if current_tokens + sentence_tokens > options.max_tokens && !current.is_empty() {
                    let content = current.join(" ");
                    results.push(ChunkResult {
                        token_count: estimate_token_count(&content),
                        content,
                        pointer_start: segment.pointer.clone(),
                        pointer_end: None,
                    });

                    // Seed the next chunk with tail sentences, newest first,
                    // until the overlap budget is reached. Always takes at
                    // least one sentence.
                    let mut overlap: Vec<&str> = Vec::new();
                    let mut overlap_tokens = 0usize;
                    for carried in current.iter().rev() {
                        if overlap_tokens >= options.overlap_tokens {
                            break;
                        }
                        overlap.push(carried);
                        overlap_tokens += estimate_token_count(carried);
                    }
                    overlap.reverse();
                    current = overlap;
                    current_tokens = overlap_tokens;
                }

                current.push(sentence);
                current_tokens += sentence_tokens;
            }

            if !current.is_empty() {
                let content = current.join(" ");
                results.push(ChunkResult {
                    token_count: estimate_token_count(&content),
                    content,
                    pointer_start: segment.pointer.clone(),
                    pointer_end: None,
                });
            }
        }

        results
    }
}

/// Fallback strategy: fixed character windows, ignoring sentence boundaries
///
/// A segment that fits within `max_tokens` passes through unchanged.
/// Otherwise the token budgets are converted to character counts via the
/// segment's average chars-per-token ratio and a window slides across the
/// text, advancing by chunk size minus overlap each step.
pub struct WindowChunker;

impl ChunkingStrategy for WindowChunker {
    fn chunk(&self, parse: &ParseResult, options: &ChunkingOptions) -> Vec<ChunkResult> {
        let mut results = Vec::new();

        for segment in &parse.segments {
            let chars: Vec<char> = segment.text.chars().collect();
            let total_tokens = estimate_token_count(&segment.text);
            if total_tokens == 0 {
                continue;
            }

            if total_tokens <= options.max_tokens {
                results.push(ChunkResult {
                    content: segment.text.clone(),
                    pointer_start: segment.pointer.clone(),
                    pointer_end: None,
                    token_count: total_tokens,
                });
                continue;
            }

            let chars_per_token = chars.len() as f64 / total_tokens as f64;
            let chunk_size = ((options.max_tokens as f64 * chars_per_token) as usize).max(1);
            let overlap_size = (options.overlap_tokens as f64 * chars_per_token) as usize;

            let mut start = 0usize;
            loop {
                let end = (start + chunk_size).min(chars.len());
                let content: String = chars[start..end].iter().collect();
                results.push(ChunkResult {
                    token_count: estimate_token_count(&content),
                    content,
                    pointer_start: segment.pointer.clone(),
                    pointer_end: None,
                });

                let next = end.saturating_sub(overlap_size);
                // Overlap at or above the window size would stall the walk.
                if next <= start {
                    break;
                }
                start = next;
                if start >= chars.len().saturating_sub(overlap_size) {
                    break;
                }
            }
        }

        results
    }
}

/// Strategy selected by the `preserve_sentences` option
pub(crate) fn strategy_for(options: &ChunkingOptions) -> Box<dyn ChunkingStrategy> {
    if options.preserve_sentences {
        Box::new(SentenceChunker)
    } else {
        Box::new(WindowChunker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FileType, ParsedSegment, SourcePointer};
    use uuid::Uuid;

    fn parse_of(text: &str) -> ParseResult {
        ParseResult {
            plain_text: text.to_string(),
            segments: vec![ParsedSegment {
                pointer: SourcePointer::page(Uuid::nil(), FileType::Txt, 1),
                text: text.to_string(),
            }],
            metadata: None,
        }
    }

    fn options(max_tokens: usize, overlap_tokens: usize) -> ChunkingOptions {
        ChunkingOptions {
            max_tokens,
            overlap_tokens,
            preserve_sentences: true,
        }
    }

    #[test]
    fn estimate_is_zero_for_empty_and_monotonic() {
        assert_eq!(estimate_token_count(""), 0);
        assert_eq!(estimate_token_count("abcd"), 1);
        assert_eq!(estimate_token_count("abcde"), 2);

        let text = "The quick brown fox jumps over the lazy dog.";
        let mut previous = 0;
        for end in 0..=text.len() {
            let estimate = estimate_token_count(&text[..end]);
            assert!(estimate >= previous);
            previous = estimate;
        }
    }

    #[test]
    fn sentences_split_on_terminator_plus_whitespace() {
        assert_eq!(
            split_into_sentences("Hello world. This is Learning Star."),
            vec!["Hello world.", "This is Learning Star."]
        );
        assert_eq!(
            split_into_sentences("Really?! Yes.\nIndeed"),
            vec!["Really?!", "Yes.", "Indeed"]
        );
        // Terminator without trailing whitespace does not split
        assert_eq!(split_into_sentences("v1.2 release"), vec!["v1.2 release"]);
        assert!(split_into_sentences("   ").is_empty());
    }

    #[test]
    fn short_input_yields_one_chunk_of_joined_sentences() {
        let parse = parse_of("Hello world.  This is Learning Star.");
        let chunks = SentenceChunker.chunk(&parse, &ChunkingOptions::default());

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "Hello world. This is Learning Star.");
        assert_eq!(chunks[0].pointer_start, parse.segments[0].pointer);
        assert_eq!(chunks[0].pointer_end, None);
        assert_eq!(
            chunks[0].token_count,
            estimate_token_count(&chunks[0].content)
        );
    }

    #[test]
    fn consecutive_chunks_share_sentence_overlap() {
        // Four 20-char sentences, 5 tokens each; two fit per chunk.
        let sentence = "a".repeat(19) + ".";
        let text = vec![sentence.clone(); 4].join(" ");
        let parse = parse_of(&text);

        let chunks = SentenceChunker.chunk(&parse, &options(10, 5));
        assert_eq!(chunks.len(), 3);
        let two = format!("{sentence} {sentence}");
        for chunk in &chunks {
            assert_eq!(chunk.content, two);
        }

        // Each chunk carries exactly one tail sentence forward.
        for pair in chunks.windows(2) {
            let carried = pair[0].content.rsplit(' ').next().unwrap();
            assert!(pair[1].content.starts_with(carried));
            assert!(estimate_token_count(carried) <= 5);
            assert!(estimate_token_count(carried) > 0);
        }
    }

    #[test]
    fn oversized_sentence_is_not_split() {
        let long_sentence = format!("{}.", "word ".repeat(50).trim_end());
        let parse = parse_of(&format!("Short one. {long_sentence}"));

        let chunks = SentenceChunker.chunk(&parse, &options(10, 2));
        assert!(chunks.iter().any(|c| c.content.contains(&long_sentence)));
        let widest = chunks.iter().map(|c| c.token_count).max().unwrap();
        assert!(widest > 10);
    }

    #[test]
    fn empty_segment_yields_no_chunks() {
        let parse = parse_of("");
        assert!(SentenceChunker
            .chunk(&parse, &ChunkingOptions::default())
            .is_empty());
        assert!(WindowChunker
            .chunk(&parse, &ChunkingOptions::default())
            .is_empty());
    }

    #[test]
    fn chunking_is_deterministic() {
        let text = "One sentence here. Another follows it! A third? Then a closing statement.";
        let parse = parse_of(text);
        let opts = options(8, 3);

        let first = SentenceChunker.chunk(&parse, &opts);
        let second = SentenceChunker.chunk(&parse, &opts);
        assert_eq!(first, second);

        let first = WindowChunker.chunk(&parse, &opts);
        let second = WindowChunker.chunk(&parse, &opts);
        assert_eq!(first, second);
    }

    #[test]
    fn window_chunker_passes_small_segments_through() {
        let parse = parse_of("fits in one window");
        let chunks = WindowChunker.chunk(&parse, &ChunkingOptions::default());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "fits in one window");
    }

    #[test]
    fn window_chunks_reconstruct_the_segment() {
        // 400 chars -> 100 tokens; windows of 10 tokens with 2-token overlap.
        let text: String = ('a'..='z').cycle().take(400).collect();
        let parse = parse_of(&text);
        let chunks = WindowChunker.chunk(&parse, &options(10, 2));
        assert!(chunks.len() > 1);

        // chars_per_token is 4, so every window after the first repeats the
        // previous window's final 8 chars.
        let mut rebuilt = chunks[0].content.clone();
        for chunk in &chunks[1..] {
            rebuilt.push_str(&chunk.content[8..]);
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn window_chunker_terminates_when_overlap_swallows_window() {
        let text: String = "x".repeat(100);
        let parse = parse_of(&text);

        // overlap == max means the window can never advance; the walk stops
        // after the first emitted window instead of spinning.
        let chunks = WindowChunker.chunk(&parse, &options(5, 5));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content.chars().count(), 20);
    }

    #[test]
    fn strategy_selection_follows_preserve_sentences() {
        // One long run of text with no sentence terminators: the sentence
        // strategy keeps it whole, the window strategy splits it.
        let text: String = "y".repeat(4000);
        let parse = parse_of(&text);

        let sentence_opts = options(100, 10);
        assert_eq!(
            strategy_for(&sentence_opts)
                .chunk(&parse, &sentence_opts)
                .len(),
            1
        );

        let window_opts = ChunkingOptions {
            preserve_sentences: false,
            ..sentence_opts
        };
        assert!(
            strategy_for(&window_opts)
                .chunk(&parse, &window_opts)
                .len()
                > 1
        );
    }
}
