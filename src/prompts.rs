pub const ANALYSIS_SYSTEM: &str = include_str!("../data/prompts/analysis_system.txt");
pub const ANALYSIS_ACK: &str = include_str!("../data/prompts/analysis_ack.txt");

/// Caption sent as the text part alongside every uploaded image.
pub const ANALYSIS_CAPTION: &str = "Please analyze this medical image:";

/// Shown to the user after every analysis, successful or not.
pub const DISCLAIMER: &str = "Disclaimer: This analysis is generated by AI and should not be \
considered as a replacement for professional medical advice.";
