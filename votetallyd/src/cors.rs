use rocket::fairing::AdHoc;
use rocket::http::Status;

/// Allow browser clients from any origin
pub fn fairing() -> AdHoc {
    AdHoc::on_response("CORS", |_req, res| {
        Box::pin(async move {
            res.set_raw_header("Access-Control-Allow-Origin", "*");
            res.set_raw_header("Access-Control-Allow-Methods", "GET,POST,PUT,DELETE,OPTIONS");
            res.set_raw_header("Access-Control-Allow-Headers", "Content-Type");
        })
    })
}

#[options("/<_..>")]
pub fn preflight() -> Status {
    Status::NoContent
}
