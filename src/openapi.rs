use utoipa::OpenApi;

use crate::models::{Booking, BookingRequest, Class, ClassDetail, ClassRequest, ErrorResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::create_class,
        crate::handlers::list_classes,
        crate::handlers::get_class,
        crate::handlers::list_class_bookings,
        crate::handlers::get_ical,
        crate::handlers::create_booking
    ),
    components(schemas(Class, ClassDetail, Booking, ClassRequest, BookingRequest, ErrorResponse)),
    tags(
        (name = "booking", description = "Class scheduling and member bookings")
    ),
)]
pub struct ApiDoc;
