/// Speech-to-text backend turning an uploaded recording into a transcript.
/// May be slow; the service calls it synchronously.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio: &[u8]) -> Result<String, TranscriptionError>;
}

/// Text-to-speech backend used to render feedback as audio.
pub trait SpeechSynthesizer: Send + Sync {
    fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SynthesisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("recording is empty")]
    EmptyAudio,
    #[error("transcription backend failed: {0}")]
    Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("language '{0}' is not supported for speech synthesis")]
    UnsupportedLanguage(String),
    #[error("speech synthesis backend failed: {0}")]
    Backend(String),
}

/// Language of the synthesized feedback.
pub const FEEDBACK_LANGUAGE: &str = "en";

/// Upload types accepted for transcription.
pub const ACCEPTED_AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a"];
