use crate::modules::event::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/events")
            .service(create_event)
            .service(list_events)
            .service(search_events)
            .service(get_event)
            .service(update_event)
            .service(delete_event)
            .service(list_attendees)
            .service(rsvp)
            .service(update_rsvp)
            .service(remove_rsvp),
    );
}
