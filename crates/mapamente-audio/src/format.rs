use std::path::Path;

/// Audio containers the transcription service accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Wav,
    Ogg,
    Webm,
}

impl AudioFormat {
    /// `audio/mp3` and `audio/mpeg` both map to MP3
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "audio/mp3" | "audio/mpeg" => Some(Self::Mp3),
            "audio/wav" => Some(Self::Wav),
            "audio/ogg" => Some(Self::Ogg),
            "audio/webm" => Some(Self::Webm),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "mp3" | "mpeg" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            "ogg" => Some(Self::Ogg),
            "webm" => Some(Self::Webm),
            _ => None,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Ogg => "audio/ogg",
            Self::Webm => "audio/webm",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime() {
        assert_eq!(AudioFormat::from_mime("audio/mp3"), Some(AudioFormat::Mp3));
        assert_eq!(AudioFormat::from_mime("audio/mpeg"), Some(AudioFormat::Mp3));
        assert_eq!(AudioFormat::from_mime("audio/webm"), Some(AudioFormat::Webm));
        assert_eq!(AudioFormat::from_mime("audio/flac"), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(AudioFormat::from_path(Path::new("aula.WAV")), Some(AudioFormat::Wav));
        assert_eq!(AudioFormat::from_path(Path::new("nota.ogg")), Some(AudioFormat::Ogg));
        assert_eq!(AudioFormat::from_path(Path::new("video.mp4")), None);
        assert_eq!(AudioFormat::from_path(Path::new("sem_extensao")), None);
    }
}
