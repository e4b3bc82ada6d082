use crate::modules::notification::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/notifications")
            .service(list_notifications)
            .service(mark_all_read)
            .service(mark_read)
            .service(delete_notification),
    );
}
