// Device dialect descriptor
//
// Two receiver families speak slightly different variants of the same web
// interface. Everything that differs between them lives here so the client
// and the adapter stay family-agnostic.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which firmware family the receiver belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceFamily {
    /// Current Enigma2 images running OpenWebIf.
    #[default]
    Enigma2,
    /// Older VU+ images with the original web interface.
    Vuplus,
}

impl DeviceFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enigma2 => "enigma2",
            Self::Vuplus => "vuplus",
        }
    }
}

impl fmt::Display for DeviceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a service reference is recognised as a radio service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RadioDetection {
    /// `RADIO` anywhere in the reference, in any letter case.
    #[default]
    CaseInsensitive,
    /// The literal lowercase substring `radio`.
    LowercaseOnly,
}

impl RadioDetection {
    pub fn is_radio(self, reference: &str) -> bool {
        match self {
            Self::CaseInsensitive => reference.to_ascii_uppercase().contains("RADIO"),
            Self::LowercaseOnly => reference.contains("radio"),
        }
    }
}

/// Element names of the record kinds the adapter reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTags {
    pub service: &'static str,
    pub movie: &'static str,
    pub timer: &'static str,
    pub event: &'static str,
    pub frontend: &'static str,
    pub simple_result: &'static str,
}

impl Default for RecordTags {
    fn default() -> Self {
        Self {
            service: "e2service",
            movie: "e2movie",
            timer: "e2timer",
            event: "e2event",
            frontend: "e2frontend",
            simple_result: "e2simplexmlresult",
        }
    }
}

/// Everything that varies between receiver families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialect {
    pub family: DeviceFamily,
    pub tags: RecordTags,
    /// Literal `e2state` value of a successful action.
    pub success_state: &'static str,
    pub radio_detection: RadioDetection,
    /// The streaming port has its own TLS flag. When `false`, streams use
    /// the web interface scheme.
    pub separate_stream_tls: bool,
    /// The receiver runs a transcoding stream server.
    pub supports_transcoding: bool,
}

impl Dialect {
    pub fn enigma2() -> Self {
        Self {
            family: DeviceFamily::Enigma2,
            tags: RecordTags::default(),
            success_state: "True",
            radio_detection: RadioDetection::CaseInsensitive,
            separate_stream_tls: true,
            supports_transcoding: true,
        }
    }

    pub fn vuplus() -> Self {
        Self {
            family: DeviceFamily::Vuplus,
            separate_stream_tls: false,
            supports_transcoding: false,
            ..Self::enigma2()
        }
    }

    pub fn for_family(family: DeviceFamily) -> Self {
        match family {
            DeviceFamily::Enigma2 => Self::enigma2(),
            DeviceFamily::Vuplus => Self::vuplus(),
        }
    }

    /// Replace the radio rule, keeping everything else.
    pub fn with_radio_detection(mut self, detection: RadioDetection) -> Self {
        self.radio_detection = detection;
        self
    }

    pub fn is_success(&self, state: &str) -> bool {
        state == self.success_state
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::enigma2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_radio_detection() {
        let rule = RadioDetection::CaseInsensitive;
        assert!(rule.is_radio("1:7:2:0:0:0:0:0:0:0:FROM BOUQUET \"userbouquet.favourites.radio\""));
        assert!(rule.is_radio("1:0:2:6D66:437:1:C00000:0:0:0:Radio"));
        assert!(!rule.is_radio("1:0:19:283D:3FB:1:C00000:0:0:0:"));
    }

    #[test]
    fn lowercase_only_radio_detection() {
        let rule = RadioDetection::LowercaseOnly;
        assert!(rule.is_radio("userbouquet.favourites.radio"));
        assert!(!rule.is_radio("USERBOUQUET.RADIO"));
    }

    #[test]
    fn families_differ_in_streaming() {
        let modern = Dialect::for_family(DeviceFamily::Enigma2);
        let legacy = Dialect::for_family(DeviceFamily::Vuplus);
        assert!(modern.separate_stream_tls && modern.supports_transcoding);
        assert!(!legacy.separate_stream_tls && !legacy.supports_transcoding);
        assert_eq!(legacy.tags, modern.tags);
        assert!(legacy.is_success("True"));
        assert!(!legacy.is_success("False"));
        assert!(!legacy.is_success("true"));
    }
}
