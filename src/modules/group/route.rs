use crate::modules::group::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/groups")
            .service(create_group)
            .service(list_groups)
            .service(get_group)
            .service(update_group)
            .service(delete_group)
            .service(list_members)
            .service(add_member)
            .service(change_role)
            .service(remove_member),
    );
}
