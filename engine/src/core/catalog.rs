//! Fixed catalogs shared across derivations.

use super::model::Badge;

/// Suggested activity types for practice logging; free-form values are
/// accepted as well.
pub const ACTIVITY_TYPES: &[&str] = &[
    "Theory study",
    "Hands-on practice",
    "Project",
    "Course",
    "Mentoring",
];

/// Chart palette, cycled by slice index.
pub const CHART_PALETTE: &[&str] = &[
    "rgba(59, 130, 246, 0.8)",
    "rgba(16, 185, 129, 0.8)",
    "rgba(245, 158, 11, 0.8)",
    "rgba(34, 197, 94, 0.8)",
    "rgba(139, 92, 246, 0.8)",
    "rgba(236, 72, 153, 0.8)",
];

/// Achievement catalog, in display order.
pub const BADGE_CATALOG: &[Badge] = &[
    Badge {
        id: "first_practice",
        label: "First Step",
        description: "First practice logged",
    },
    Badge {
        id: "weekly_streak",
        label: "Consistent",
        description: "7 consecutive days practicing",
    },
    Badge {
        id: "polymath",
        label: "Polymath",
        description: "5+ skills registered",
    },
    Badge {
        id: "dedicated",
        label: "Dedicated",
        description: "100 total hours of practice",
    },
    Badge {
        id: "expert",
        label: "Expert",
        description: "A skill reached level 10",
    },
];
