//! Page routing for the single-page UI.
//!
//! Navigation addresses look like `#/equipment/42` in the browser and
//! `/equipment/42` on the server. Both forms resolve through [`RouteState`]:
//! a closed set of page identifiers plus one optional trailing segment,
//! treated uniformly as a record id. Unrecognized pages fall back to the
//! dashboard - there is no 404 page - and an empty address resolves to the
//! default view.

use rocket::Route;
use rocket::response::Redirect;
use rocket::response::content::RawHtml;

/// The recognized pages. `parse` never fails: unknown identifiers land on
/// `Dashboard`, the explicit fallback variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Maintenance,
    Equipment,
    FloorPlans,
    Inventory,
    Purchasing,
    Users,
    Settings,
}

impl Page {
    pub const ALL: [Page; 8] = [
        Page::Dashboard,
        Page::Maintenance,
        Page::Equipment,
        Page::FloorPlans,
        Page::Inventory,
        Page::Purchasing,
        Page::Users,
        Page::Settings,
    ];

    /// The URL segment for the page. The floor-plan page keeps its
    /// historical `planimetrie` segment so existing bookmarks resolve.
    pub fn slug(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Maintenance => "maintenance",
            Page::Equipment => "equipment",
            Page::FloorPlans => "planimetrie",
            Page::Inventory => "inventory",
            Page::Purchasing => "purchasing",
            Page::Users => "users",
            Page::Settings => "settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Maintenance => "Maintenance",
            Page::Equipment => "Equipment",
            Page::FloorPlans => "Floor Plans",
            Page::Inventory => "Inventory",
            Page::Purchasing => "Purchasing",
            Page::Users => "Users & Roles",
            Page::Settings => "Settings",
        }
    }

    pub fn parse(segment: &str) -> Page {
        Page::ALL
            .iter()
            .copied()
            .find(|p| p.slug() == segment)
            .unwrap_or(Page::Dashboard)
    }
}

/// A resolved navigation address: the active page and, when present, the
/// single record-id segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteState {
    pub page: Page,
    pub id: Option<String>,
}

impl RouteState {
    /// Parses a fragment (`#/equipment/42`), an absolute path
    /// (`/equipment/42`) or a bare address (`equipment/42`). Leading hash
    /// marks, surrounding slashes and anything past the id segment are
    /// ignored.
    pub fn parse(raw: &str) -> RouteState {
        let trimmed = raw
            .trim()
            .trim_start_matches('#')
            .trim_matches('/');

        let mut segments = trimmed.split('/').filter(|s| !s.is_empty());
        let page = match segments.next() {
            Some(segment) => Page::parse(segment),
            None => Page::Dashboard,
        };
        let id = segments.next().map(|s| s.to_string());

        RouteState { page, id }
    }
}

/// The HTML shell handed to the browser for any app route. The bundle reads
/// the resolved page from the root element and takes over navigation.
fn shell(route: &RouteState) -> RawHtml<String> {
    let record_attr = route
        .id
        .as_deref()
        .map(|id| format!(" data-record-id=\"{id}\""))
        .unwrap_or_default();
    RawHtml(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>CMMS - {title}</title>\n<link rel=\"stylesheet\" href=\"/app.css\">\n</head>\n\
         <body>\n<div id=\"root\" data-page=\"{slug}\"{record_attr}></div>\n\
         <script type=\"module\" src=\"/app.js\"></script>\n</body>\n</html>\n",
        title = route.page.title(),
        slug = route.page.slug(),
    ))
}

/// Absence of any address forces the one-time redirect to the default view.
#[get("/")]
fn index() -> Redirect {
    Redirect::to(format!("/{}", Page::Dashboard.slug()))
}

#[get("/<page>", rank = 20)]
fn page_shell(page: &str) -> RawHtml<String> {
    shell(&RouteState::parse(page))
}

#[get("/<page>/<id>", rank = 20)]
fn record_shell(page: &str, id: &str) -> RawHtml<String> {
    shell(&RouteState::parse(&format!("{page}/{id}")))
}

/// The shell routes: ranked below the static file server so real assets win.
pub fn routes() -> Vec<Route> {
    routes![index, page_shell, record_shell]
}
