//! Authorization policy.
//!
//! Pure decisions over a principal's role and flags. The edge route guard
//! and every API handler consult these same functions.

use super::user::{SafeUser, User, UserRole};
use crate::config::{ACCESS_DENIED_PATH, ADMIN_HOME_PATH, DASHBOARD_HOME_PATH};

/// Anything carrying the attributes the policy decides on.
pub trait Principal {
    fn role(&self) -> UserRole;
    fn is_admin(&self) -> bool;
    fn is_leader(&self) -> bool;
}

impl Principal for SafeUser {
    fn role(&self) -> UserRole {
        self.role
    }

    fn is_admin(&self) -> bool {
        self.is_admin
    }

    fn is_leader(&self) -> bool {
        self.is_leader
    }
}

impl Principal for User {
    fn role(&self) -> UserRole {
        self.role
    }

    fn is_admin(&self) -> bool {
        self.is_admin
    }

    fn is_leader(&self) -> bool {
        self.is_leader
    }
}

/// Functional areas leaders may edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    Gallery,
    Agenda,
    Equipment,
    MediaSchedule,
    WorshipSchedule,
    Songs,
    Playlists,
    WorkerSchedule,
}

impl Area {
    pub const ALL: [Area; 8] = [
        Area::Gallery,
        Area::Agenda,
        Area::Equipment,
        Area::MediaSchedule,
        Area::WorshipSchedule,
        Area::Songs,
        Area::Playlists,
        Area::WorkerSchedule,
    ];

    /// Resolve a dashboard path segment to its area.
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "galeria" => Some(Area::Gallery),
            "agenda" => Some(Area::Agenda),
            "equipamentos" => Some(Area::Equipment),
            "escala-midia" => Some(Area::MediaSchedule),
            "escala-louvor" => Some(Area::WorshipSchedule),
            "musicas" | "repertorio" => Some(Area::Songs),
            "playlists" => Some(Area::Playlists),
            "escala-obreiros" => Some(Area::WorkerSchedule),
            _ => None,
        }
    }

    /// Canonical dashboard slug.
    pub fn slug(&self) -> &'static str {
        match self {
            Area::Gallery => "galeria",
            Area::Agenda => "agenda",
            Area::Equipment => "equipamentos",
            Area::MediaSchedule => "escala-midia",
            Area::WorshipSchedule => "escala-louvor",
            Area::Songs => "musicas",
            Area::Playlists => "playlists",
            Area::WorkerSchedule => "escala-obreiros",
        }
    }

    /// The operational role whose leaders own this area.
    pub fn owner(&self) -> UserRole {
        match self {
            Area::Gallery | Area::Agenda | Area::Equipment | Area::MediaSchedule => {
                UserRole::MediaChurch
            }
            Area::WorshipSchedule | Area::Songs | Area::Playlists => UserRole::WorshipChurch,
            Area::WorkerSchedule => UserRole::Workers,
        }
    }
}

/// Access tier of a page path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTier {
    Public,
    General,
    Department(Area),
    Privileged,
}

const PRIVILEGED_PREFIXES: [&str; 2] = ["/app", "/admin-tools"];

/// Globally admin-flagged, or holding the MASTER/DEVELOPER role.
pub fn is_privileged<P: Principal + ?Sized>(user: &P) -> bool {
    user.is_admin() || matches!(user.role(), UserRole::Master | UserRole::Developer)
}

/// Holds one of the four non-privileged roles that reach the general dashboard.
pub fn is_operational<P: Principal + ?Sized>(user: &P) -> bool {
    matches!(
        user.role(),
        UserRole::User | UserRole::MediaChurch | UserRole::WorshipChurch | UserRole::Workers
    )
}

/// May edit resources in `area`.
pub fn can_access_area<P: Principal + ?Sized>(user: &P, area: Area) -> bool {
    is_privileged(user) || (user.is_leader() && user.role() == area.owner())
}

/// Classify a request path into its access tier.
pub fn route_tier(path: &str) -> RouteTier {
    if PRIVILEGED_PREFIXES
        .iter()
        .any(|prefix| under_prefix(path, prefix))
    {
        return RouteTier::Privileged;
    }

    if let Some(rest) = strip_segment_prefix(path, DASHBOARD_HOME_PATH) {
        return rest
            .split('/')
            .find(|segment| !segment.is_empty())
            .and_then(Area::from_slug)
            .map(RouteTier::Department)
            .unwrap_or(RouteTier::General);
    }

    RouteTier::Public
}

/// Decide whether `user` (None = anonymous) may open `path`.
pub fn can_access_route<P: Principal + ?Sized>(user: Option<&P>, path: &str) -> bool {
    let tier = route_tier(path);
    if tier == RouteTier::Public {
        return true;
    }

    let Some(user) = user else {
        return false;
    };
    if is_privileged(user) {
        return true;
    }

    match tier {
        RouteTier::Public => true,
        RouteTier::General => is_operational(user),
        RouteTier::Department(area) => can_access_area(user, area),
        RouteTier::Privileged => false,
    }
}

/// Landing page for an authenticated user.
pub fn home_for<P: Principal + ?Sized>(user: &P) -> &'static str {
    if is_privileged(user) {
        ADMIN_HOME_PATH
    } else if is_operational(user) {
        DASHBOARD_HOME_PATH
    } else {
        ACCESS_DENIED_PATH
    }
}

/// `path` equals `prefix` or continues it with a new segment.
pub fn under_prefix(path: &str, prefix: &str) -> bool {
    strip_segment_prefix(path, prefix).is_some()
}

fn strip_segment_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix)?;
    (rest.is_empty() || rest.starts_with('/')).then_some(rest)
}
