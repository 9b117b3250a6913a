use std::str::FromStr;

use strum_macros::{Display, EnumString};

use crate::TargetError;

/// What kind of Q&A item is being shared
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ShareKind {
    Question,
    Answer,
}

/// How the share menu is presented. Mobile hosts render the items inline
/// inside their own container, so no toggle or dropdown is drawn.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ShareMode {
    #[default]
    Normal,
    Mobile,
}

impl ShareMode {
    /// Edge length of the rendered QR code, in points
    pub fn qr_display_size(&self) -> u32 {
        match self {
            ShareMode::Normal => 160,
            ShareMode::Mobile => 120,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ShareTarget {
    Question { qid: String },
    Answer { qid: String, aid: String },
}

impl ShareTarget {
    pub fn question(qid: impl Into<String>) -> Self {
        ShareTarget::Question { qid: qid.into() }
    }

    pub fn answer(qid: impl Into<String>, aid: impl Into<String>) -> Self {
        ShareTarget::Answer {
            qid: qid.into(),
            aid: aid.into(),
        }
    }

    /// Build a target from loosely typed host props. The answer id is
    /// ignored for questions.
    pub fn from_parts(
        kind: ShareKind,
        qid: impl Into<String>,
        aid: Option<String>,
    ) -> Result<Self, TargetError> {
        let qid = qid.into();
        if qid.is_empty() {
            return Err(TargetError::MissingQuestionId);
        }

        match kind {
            ShareKind::Question => Ok(ShareTarget::Question { qid }),
            ShareKind::Answer => match aid {
                Some(aid) if !aid.is_empty() => Ok(ShareTarget::Answer { qid, aid }),
                _ => Err(TargetError::MissingAnswerId),
            },
        }
    }

    /// Site relative path of the item, starting with a slash
    pub fn path(&self) -> String {
        match self {
            ShareTarget::Question { qid } => format!("/questions/{qid}"),
            ShareTarget::Answer { qid, aid } => format!("/questions/{qid}/{aid}"),
        }
    }
}

/// Everything the host passes to a share menu
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ShareProps {
    pub target: ShareTarget,
    pub title: String,
    pub class_name: Option<String>,
    pub mode: ShareMode,
}

impl ShareProps {
    pub fn new(target: ShareTarget, title: impl Into<String>) -> Self {
        Self {
            target,
            title: title.into(),
            class_name: None,
            mode: ShareMode::default(),
        }
    }

    /// Parse the string form used by web hosts: `type`, `qid`, `aid`, `mode`.
    pub fn from_raw(
        kind: &str,
        qid: &str,
        aid: Option<&str>,
        title: &str,
        mode: Option<&str>,
    ) -> Result<Self, TargetError> {
        let kind =
            ShareKind::from_str(kind).map_err(|_| TargetError::UnknownKind(kind.to_owned()))?;
        let mode = match mode {
            None => ShareMode::default(),
            Some(m) => ShareMode::from_str(m).map_err(|_| TargetError::UnknownMode(m.to_owned()))?,
        };
        let target = ShareTarget::from_parts(kind, qid, aid.map(str::to_owned))?;

        Ok(ShareProps::new(target, title).mode(mode))
    }

    pub fn mode(mut self, mode: ShareMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_requires_answer_id() {
        assert_eq!(
            ShareTarget::from_parts(ShareKind::Answer, "42", None),
            Err(TargetError::MissingAnswerId)
        );
        assert_eq!(
            ShareTarget::from_parts(ShareKind::Answer, "42", Some(String::new())),
            Err(TargetError::MissingAnswerId)
        );
        assert_eq!(
            ShareTarget::from_parts(ShareKind::Answer, "42", Some("7".to_owned())),
            Ok(ShareTarget::answer("42", "7"))
        );
    }

    #[test]
    fn question_ignores_answer_id() {
        let target = ShareTarget::from_parts(ShareKind::Question, "42", Some("7".to_owned()));
        assert_eq!(target, Ok(ShareTarget::question("42")));
    }

    #[test]
    fn empty_question_id_is_rejected() {
        assert_eq!(
            ShareTarget::from_parts(ShareKind::Question, "", None),
            Err(TargetError::MissingQuestionId)
        );
    }

    #[test]
    fn paths() {
        assert_eq!(ShareTarget::question("42").path(), "/questions/42");
        assert_eq!(ShareTarget::answer("42", "7").path(), "/questions/42/7");
    }

    #[test]
    fn raw_props() {
        let props = ShareProps::from_raw("answer", "42", Some("7"), "Hello", Some("mobile"))
            .expect("props");
        assert_eq!(props.target, ShareTarget::answer("42", "7"));
        assert_eq!(props.mode, ShareMode::Mobile);
        assert_eq!(props.title, "Hello");

        let props = ShareProps::from_raw("question", "42", None, "", None).expect("props");
        assert_eq!(props.mode, ShareMode::Normal);

        assert_eq!(
            ShareProps::from_raw("comment", "42", None, "", None),
            Err(TargetError::UnknownKind("comment".to_owned()))
        );
        assert_eq!(
            ShareProps::from_raw("question", "42", None, "", Some("tablet")),
            Err(TargetError::UnknownMode("tablet".to_owned()))
        );
    }

    #[test]
    fn qr_sizes() {
        assert_eq!(ShareMode::Normal.qr_display_size(), 160);
        assert_eq!(ShareMode::Mobile.qr_display_size(), 120);
    }
}
