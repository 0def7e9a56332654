/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Review outcome of a homework submission.
///
/// Closed set: a code outside these three coming from the API is an error
/// condition, never a silently-ignored value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Human-readable verdict text shown in the chat.
    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// The last report composed by the poll loop, kept in memory only for
/// duplicate suppression. `homework` is empty for synthesized reports
/// (empty polling window, program failures).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub homework: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip_the_closed_set() {
        assert_eq!(
            HomeworkStatus::from_code("approved"),
            Some(HomeworkStatus::Approved)
        );
        assert_eq!(
            HomeworkStatus::from_code("reviewing"),
            Some(HomeworkStatus::Reviewing)
        );
        assert_eq!(
            HomeworkStatus::from_code("rejected"),
            Some(HomeworkStatus::Rejected)
        );
        assert_eq!(HomeworkStatus::from_code("unknown"), None);
        assert_eq!(HomeworkStatus::from_code("Approved"), None);
    }

    #[test]
    fn verdicts_match_user_facing_texts() {
        assert_eq!(
            HomeworkStatus::Approved.verdict(),
            "Работа проверена: ревьюеру всё понравилось. Ура!"
        );
        assert_eq!(
            HomeworkStatus::Reviewing.verdict(),
            "Работа взята на проверку ревьюером."
        );
        assert_eq!(
            HomeworkStatus::Rejected.verdict(),
            "Работа проверена: у ревьюера есть замечания."
        );
    }
}
