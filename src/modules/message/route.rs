use crate::modules::message::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/messages")
            .service(send_message)
            .service(list_threads)
            .service(list_conversation)
            .service(mark_thread_read)
            .service(mark_read),
    );
}
