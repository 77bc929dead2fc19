//! The scripted greeting shown when the widget starts.

use serde::{Deserialize, Serialize};

use crate::render::escape_html;
use crate::types::Message;

const DEFAULT_ABOUT: &str = "Welcome to my portfolio! I'm a passionate developer with expertise in building scalable web applications and solving complex technical challenges. With years of experience in software development, I specialize in creating efficient, user-friendly solutions that make a difference.";

/// Copy for the two greeting messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GreetingContent {
    /// The "about me" blurb, shown first as plain text.
    pub about: String,
    /// Text before the resume link.
    pub resume_prefix: String,
    /// The resume file the link points at.
    pub resume_file: String,
    /// The link's label.
    pub resume_label: String,
}

impl GreetingContent {
    /// The first greeting message.
    pub fn about_message(&self) -> Message {
        Message::bot(self.about.clone())
    }

    /// The second greeting message: the only markup the widget ever shows.
    pub fn resume_message(&self) -> Message {
        Message::bot_html(self.resume_markup())
    }

    /// The resume line as markup, with every configured piece escaped.
    pub fn resume_markup(&self) -> String {
        format!(
            r#"{}<a href="{}" target="_blank" class="resume-link">{}</a>"#,
            escape_html(&self.resume_prefix),
            escape_html(&self.resume_file),
            escape_html(&self.resume_label),
        )
    }
}

impl Default for GreetingContent {
    fn default() -> Self {
        Self {
            about: DEFAULT_ABOUT.to_string(),
            resume_prefix: "Feel free to check out my resume: ".to_string(),
            resume_file: "resume.pdf".to_string(),
            resume_label: "Open Resume PDF".to_string(),
        }
    }
}

/// The greeting's steps, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreetingStep {
    /// Drop the first indicator and show the about blurb.
    RevealAbout,
    /// Show the indicator for the resume line.
    ShowResumeIndicator,
    /// Drop the second indicator and show the resume line.
    RevealResume,
}

impl GreetingStep {
    /// The step that follows this one, if any.
    pub fn next(&self) -> Option<GreetingStep> {
        match self {
            GreetingStep::RevealAbout => Some(GreetingStep::ShowResumeIndicator),
            GreetingStep::ShowResumeIndicator => Some(GreetingStep::RevealResume),
            GreetingStep::RevealResume => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_resume_markup() {
        assert_eq!(
            GreetingContent::default().resume_markup(),
            r#"Feel free to check out my resume: <a href="resume.pdf" target="_blank" class="resume-link">Open Resume PDF</a>"#
        );
    }

    #[test]
    fn filename_is_attribute_escaped() {
        let greeting = GreetingContent {
            resume_file: r#"cv".pdf" onclick="x"#.to_string(),
            ..GreetingContent::default()
        };
        let markup = greeting.resume_markup();
        assert!(markup.contains(r#"href="cv&quot;.pdf&quot; onclick=&quot;x""#));
        assert!(greeting.resume_message().is_html);
        assert!(!greeting.about_message().is_html);
    }

    #[test]
    fn steps_in_order() {
        assert_eq!(
            GreetingStep::RevealAbout.next(),
            Some(GreetingStep::ShowResumeIndicator)
        );
        assert_eq!(
            GreetingStep::ShowResumeIndicator.next(),
            Some(GreetingStep::RevealResume)
        );
        assert_eq!(GreetingStep::RevealResume.next(), None);
    }
}
