//! Shared domain enums (wire values are upper-case strings)

use serde::{Deserialize, Serialize};

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in display order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($name), s)),
                }
            }
        }
    };
}

wire_enum! {
    /// Lifecycle status of a physical copy
    BookStatus {
        Available => "AVAILABLE",
        Borrowed => "BORROWED",
        Reserved => "RESERVED",
        Maintenance => "MAINTENANCE",
        Lost => "LOST",
        Damaged => "DAMAGED",
    }
}

wire_enum! {
    /// Physical condition of a copy
    BookCondition {
        New => "NEW",
        Excellent => "EXCELLENT",
        Good => "GOOD",
        Fair => "FAIR",
        Poor => "POOR",
        Damaged => "DAMAGED",
    }
}

wire_enum! {
    /// Member account status
    MemberStatus {
        Active => "ACTIVE",
        Pending => "PENDING",
        Suspended => "SUSPENDED",
        Inactive => "INACTIVE",
    }
}

wire_enum! {
    /// Borrow record status
    BorrowStatus {
        Active => "ACTIVE",
        Returned => "RETURNED",
        Overdue => "OVERDUE",
    }
}

wire_enum! {
    /// Kind of authenticated account
    UserType {
        Member => "MEMBER",
        Admin => "ADMIN",
    }
}

impl Default for BookStatus {
    fn default() -> Self {
        BookStatus::Available
    }
}

impl Default for BookCondition {
    fn default() -> Self {
        BookCondition::New
    }
}

/// Notification category.
///
/// The backend may grow new categories; unknown values are kept verbatim
/// in `Other` instead of failing the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationType {
    General,
    Welcome,
    Reminder,
    Overdue,
    Maintenance,
    NewBooks,
    Holiday,
    Event,
    Other(String),
}

impl NotificationType {
    /// Known categories, in the order the admin page offers them
    pub const KNOWN: [NotificationType; 8] = [
        NotificationType::General,
        NotificationType::Welcome,
        NotificationType::Reminder,
        NotificationType::Overdue,
        NotificationType::Maintenance,
        NotificationType::NewBooks,
        NotificationType::Holiday,
        NotificationType::Event,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            NotificationType::General => "GENERAL",
            NotificationType::Welcome => "WELCOME",
            NotificationType::Reminder => "REMINDER",
            NotificationType::Overdue => "OVERDUE",
            NotificationType::Maintenance => "MAINTENANCE",
            NotificationType::NewBooks => "NEW_BOOKS",
            NotificationType::Holiday => "HOLIDAY",
            NotificationType::Event => "EVENT",
            NotificationType::Other(s) => s.as_str(),
        }
    }

    /// Default message body offered when an admin picks this category
    pub fn template(&self) -> &'static str {
        match self {
            NotificationType::Welcome => "Welcome to the library! Your account has been approved and you can now start borrowing books.",
            NotificationType::Reminder => "This is a friendly reminder about your borrowed books. Please check your due dates.",
            NotificationType::Overdue => "You have overdue books. Please return them as soon as possible to avoid late fees.",
            NotificationType::Maintenance => "The library will be closed for maintenance. Please check our website for updates.",
            NotificationType::NewBooks => "New books have been added to our collection. Visit us to check out the latest arrivals!",
            NotificationType::Holiday => "Please note our holiday hours. The library schedule may be different during holidays.",
            NotificationType::Event => "Join us for upcoming library events and programs. Check the events calendar for details.",
            NotificationType::General | NotificationType::Other(_) => "",
        }
    }
}

impl Default for NotificationType {
    fn default() -> Self {
        NotificationType::General
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(NotificationType::from(s.to_string()))
    }
}

impl From<String> for NotificationType {
    fn from(s: String) -> Self {
        match s.trim().to_uppercase().as_str() {
            "GENERAL" => NotificationType::General,
            "WELCOME" => NotificationType::Welcome,
            "REMINDER" => NotificationType::Reminder,
            "OVERDUE" => NotificationType::Overdue,
            "MAINTENANCE" => NotificationType::Maintenance,
            "NEW_BOOKS" => NotificationType::NewBooks,
            "HOLIDAY" => NotificationType::Holiday,
            "EVENT" => NotificationType::Event,
            _ => NotificationType::Other(s),
        }
    }
}

impl From<NotificationType> for String {
    fn from(t: NotificationType) -> Self {
        t.as_str().to_string()
    }
}
