use serde::{Deserialize, Serialize};

/// The five fixed companion personas. Display metadata lives on the variant
/// so every surface handles all of them or fails to compile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Persona {
    #[default]
    CasualBuddy,
    CaringSibling,
    GoodParent,
    StrictProfessional,
    WildCard,
}

impl Persona {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CasualBuddy => "casualBuddy",
            Self::CaringSibling => "caringSibling",
            Self::GoodParent => "goodParent",
            Self::StrictProfessional => "strictProfessional",
            Self::WildCard => "wildCard",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CasualBuddy => "Casual Buddy",
            Self::CaringSibling => "Caring Sibling",
            Self::GoodParent => "Good Parent",
            Self::StrictProfessional => "Strict Professional",
            Self::WildCard => "Wild Card",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::CasualBuddy => "😎",
            Self::CaringSibling => "🤗",
            Self::GoodParent => "🥰",
            Self::StrictProfessional => "💼",
            Self::WildCard => "🎭",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::CasualBuddy => "Laid-back friend who keeps it real",
            Self::CaringSibling => "Supportive and encouraging companion",
            Self::GoodParent => "Gentle guidance with loving care",
            Self::StrictProfessional => "Direct and focused on results",
            Self::WildCard => "Unpredictable and fun-loving",
        }
    }

    pub fn sample_line(&self) -> &'static str {
        match self {
            Self::CasualBuddy => "Yo, let's get this day sorted without stress!",
            Self::CaringSibling => "I've got your back! Let's make today amazing.",
            Self::GoodParent => "Take your time, sweetheart. You're doing great.",
            Self::StrictProfessional => "Time is valuable. Let's execute efficiently.",
            Self::WildCard => "Life's a game. Let's play it with style!",
        }
    }

    pub const ALL: &'static [Persona] = &[
        Persona::CasualBuddy,
        Persona::CaringSibling,
        Persona::GoodParent,
        Persona::StrictProfessional,
        Persona::WildCard,
    ];
}

/// Self-descriptions offered during onboarding. Free-form strings on the
/// wire; the backend does not interpret them beyond storage.
pub const PERSONALITY_TYPES: &[&str] = &[
    "Shy & Introverted",
    "Bold & Outgoing",
    "Structured & Organized",
    "Creative & Flexible",
    "Analytical & Detail-oriented",
];

pub const TIMEZONES: &[&str] = &[
    "UTC-8 (PST)",
    "UTC-7 (MST)",
    "UTC-6 (CST)",
    "UTC-5 (EST)",
    "UTC+0 (GMT)",
    "UTC+1 (CET)",
    "UTC+5:30 (IST)",
    "UTC+8 (CST)",
    "UTC+9 (JST)",
];

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub personality_type: String,
    #[serde(default)]
    pub selected_persona: Persona,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TrialStatus {
    pub trial_active: bool,
    pub subscription_active: bool,
    #[serde(default)]
    pub days_left: i64,
}

impl TrialStatus {
    /// Initial window installed right after onboarding, by backend convention.
    pub fn fresh_trial() -> Self {
        Self {
            trial_active: true,
            subscription_active: false,
            days_left: 3,
        }
    }

    pub fn subscribed() -> Self {
        Self {
            trial_active: false,
            subscription_active: true,
            days_left: 0,
        }
    }

    /// True when neither the trial nor a subscription grants access; this is
    /// the paywall gate.
    pub fn is_locked(&self) -> bool {
        !self.trial_active && !self.subscription_active
    }
}

/// The authenticated user's profile plus trial state. Owned exclusively by
/// the application shell; destroyed on logout.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: UserProfile,
    pub trial: TrialStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionPlan {
    Monthly,
    Annual,
}

impl SubscriptionPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Annual => "Annual",
        }
    }

    pub fn price_line(&self) -> &'static str {
        match self {
            Self::Monthly => "$4.99 /month",
            Self::Annual => "$39.99 /year",
        }
    }

    pub fn savings(&self) -> Option<&'static str> {
        match self {
            Self::Monthly => None,
            Self::Annual => Some("Save 33%"),
        }
    }

    pub const ALL: &'static [SubscriptionPlan] =
        &[SubscriptionPlan::Monthly, SubscriptionPlan::Annual];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persona_wire_ids() {
        let json = serde_json::to_string(&Persona::StrictProfessional).unwrap();
        assert_eq!(json, "\"strictProfessional\"");
        let parsed: Persona = serde_json::from_str("\"wildCard\"").unwrap();
        assert_eq!(parsed, Persona::WildCard);
    }

    #[test]
    fn trial_gate() {
        assert!(!TrialStatus::fresh_trial().is_locked());
        assert!(!TrialStatus::subscribed().is_locked());
        let expired = TrialStatus {
            trial_active: false,
            subscription_active: false,
            days_left: 0,
        };
        assert!(expired.is_locked());
    }

    #[test]
    fn profile_parses_backend_shape() {
        let json = r#"{
            "id": "u-1",
            "name": "Mina",
            "timezone": "UTC+1 (CET)",
            "personality_type": "Creative & Flexible",
            "selected_persona": "goodParent",
            "created_at": "2026-08-01T09:00:00",
            "trial_started": "2026-08-01T09:00:00"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.selected_persona, Persona::GoodParent);
        assert_eq!(profile.name, "Mina");
    }
}
