pub mod company;
pub mod equipment;
pub mod login;
pub mod logout;
pub mod reference;
pub mod site;
pub mod status;
pub mod user;

use rocket::Route;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(company::routes());
    routes.extend(equipment::routes());
    routes.extend(login::routes());
    routes.extend(logout::routes());
    routes.extend(reference::routes());
    routes.extend(site::routes());
    routes.extend(status::routes());
    routes.extend(user::routes());
    routes
}
