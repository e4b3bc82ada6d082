use crate::modules::friend::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/friends")
            .service(send_friend_request)
            .service(list_incoming_requests)
            .service(list_outgoing_requests)
            .service(list_friends)
            .service(get_friendship)
            .service(accept_friend_request)
            .service(reject_friend_request)
            .service(block_friendship)
            .service(unlink_friendship),
    );
}
