use super::labels::{TRANSCRIPT_AWAITING_SPEECH, TRANSCRIPT_IDLE};
use crate::recognition::ResultFragment;

/// Merges interim and final recognition results into the live transcript
///
/// Confirmed segments are append-only. The interim text is a re-estimate
/// and is replaced wholesale by every delivery.
#[derive(Debug, Clone)]
pub struct TranscriptAssembler {
    finalized: Vec<String>,
    interim: String,
    placeholder: &'static str,
}

impl TranscriptAssembler {
    pub fn new() -> Self {
        Self {
            finalized: Vec::new(),
            interim: String::new(),
            placeholder: TRANSCRIPT_IDLE,
        }
    }

    /// Back to the initial placeholder, dropping every segment
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Apply one delivery of fragments.
    ///
    /// Returns the finalized utterance of this delivery, trimmed, when it has
    /// any non-whitespace text.
    pub fn ingest(&mut self, fragments: &[ResultFragment]) -> Option<String> {
        let mut finalized = String::new();
        let mut interim = String::new();

        for fragment in fragments {
            if fragment.is_final {
                finalized.push_str(&fragment.text);
            } else {
                interim.push_str(&fragment.text);
            }
        }

        self.interim = interim;
        self.placeholder = TRANSCRIPT_AWAITING_SPEECH;

        let utterance = finalized.trim();
        if utterance.is_empty() {
            return None;
        }

        self.finalized.push(utterance.to_string());
        Some(utterance.to_string())
    }

    /// Confirmed segments in arrival order
    pub fn finalized(&self) -> &[String] {
        &self.finalized
    }

    pub fn interim(&self) -> &str {
        &self.interim
    }

    /// Finalized text followed by the bracketed interim estimate
    pub fn display_text(&self) -> String {
        let mut text = self.finalized.join(" ");

        let interim = self.interim.trim();
        if !interim.is_empty() {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push('[');
            text.push_str(interim);
            text.push(']');
        }

        if text.is_empty() {
            self.placeholder.to_string()
        } else {
            text
        }
    }
}

impl Default for TranscriptAssembler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_placeholder() {
        let assembler = TranscriptAssembler::new();
        assert_eq!(assembler.display_text(), TRANSCRIPT_IDLE);
        assert!(assembler.finalized().is_empty());
    }

    #[test]
    fn test_interim_replaces_previous_interim() {
        let mut assembler = TranscriptAssembler::new();

        assert_eq!(assembler.ingest(&[ResultFragment::interim("prec")]), None);
        assert_eq!(assembler.ingest(&[ResultFragment::interim("preciso de")]), None);
        assert_eq!(
            assembler.ingest(&[ResultFragment::interim("preciso de um")]),
            None
        );

        assert_eq!(assembler.interim(), "preciso de um");
        assert_eq!(assembler.display_text(), "[preciso de um]");
    }

    #[test]
    fn test_final_fragments_concatenate_into_one_utterance() {
        let mut assembler = TranscriptAssembler::new();

        let utterance = assembler.ingest(&[
            ResultFragment::final_text(" preciso de"),
            ResultFragment::interim("uma"),
            ResultFragment::final_text(" um orçamento "),
        ]);

        assert_eq!(utterance.as_deref(), Some("preciso de um orçamento"));
        assert_eq!(assembler.finalized(), ["preciso de um orçamento"]);
        assert_eq!(assembler.display_text(), "preciso de um orçamento [uma]");
    }

    #[test]
    fn test_whitespace_final_is_suppressed() {
        let mut assembler = TranscriptAssembler::new();

        assert_eq!(assembler.ingest(&[ResultFragment::final_text("   ")]), None);
        assert!(assembler.finalized().is_empty());
        assert_eq!(assembler.display_text(), TRANSCRIPT_AWAITING_SPEECH);
    }

    #[test]
    fn test_interim_cleared_when_delivery_has_none() {
        let mut assembler = TranscriptAssembler::new();

        assembler.ingest(&[ResultFragment::interim("bom dia")]);
        assembler.ingest(&[ResultFragment::final_text("bom dia")]);

        assert_eq!(assembler.interim(), "");
        assert_eq!(assembler.display_text(), "bom dia");
    }

    #[test]
    fn test_segments_append_in_arrival_order() {
        let mut assembler = TranscriptAssembler::new();

        assembler.ingest(&[ResultFragment::final_text("primeiro")]);
        assembler.ingest(&[ResultFragment::final_text("segundo")]);

        assert_eq!(assembler.finalized(), ["primeiro", "segundo"]);
        assert_eq!(assembler.display_text(), "primeiro segundo");
    }

    #[test]
    fn test_reset_restores_placeholder() {
        let mut assembler = TranscriptAssembler::new();
        assembler.ingest(&[
            ResultFragment::final_text("olá"),
            ResultFragment::interim("tudo"),
        ]);

        assembler.reset();

        assert!(assembler.finalized().is_empty());
        assert_eq!(assembler.interim(), "");
        assert_eq!(assembler.display_text(), TRANSCRIPT_IDLE);
    }
}
