//! Route table
//!
//! | Method | Path | Role |
//! |---|---|---|
//! | GET | `/` | none |
//! | GET/POST | `/signup` | none |
//! | GET/POST | `/login` | none |
//! | GET | `/logout` | any |
//! | GET | `/patient/dashboard` | patient |
//! | GET | `/doctor/dashboard` | doctor |
//! | GET/POST | `/book-appointment` | patient |
//! | GET | `/view-appointment/{id}` | patient, owner only |
//! | GET | `/doctor/view-appointment/{id}` | doctor |
//! | POST | `/doctor/submit-diagnosis/{id}` | doctor |
//! | GET | `/patient/profile` | patient |
//! | GET | `/doctor/profile` | doctor |
//! | GET/POST | `/forgot-password` | none |

use super::error::ApiError;
use super::handlers;
use crate::domain::ClinicError;
use actix_web::web;

/// Register every route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(form_config())
        .route("/", web::get().to(handlers::index))
        .service(
            web::resource("/signup")
                .route(web::get().to(handlers::signup_form))
                .route(web::post().to(handlers::signup)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(handlers::login_form))
                .route(web::post().to(handlers::login)),
        )
        .route("/logout", web::get().to(handlers::logout))
        .route("/patient/dashboard", web::get().to(handlers::patient_dashboard))
        .route("/doctor/dashboard", web::get().to(handlers::doctor_dashboard))
        .service(
            web::resource("/book-appointment")
                .route(web::get().to(handlers::booking_options))
                .route(web::post().to(handlers::book_appointment)),
        )
        .route(
            "/view-appointment/{id}",
            web::get().to(handlers::view_appointment_patient),
        )
        .route(
            "/doctor/view-appointment/{id}",
            web::get().to(handlers::view_appointment_doctor),
        )
        .route(
            "/doctor/submit-diagnosis/{id}",
            web::post().to(handlers::submit_diagnosis),
        )
        .route("/patient/profile", web::get().to(handlers::patient_profile))
        .route("/doctor/profile", web::get().to(handlers::doctor_profile))
        .service(
            web::resource("/forgot-password")
                .route(web::get().to(handlers::forgot_password_form))
                .route(web::post().to(handlers::forgot_password)),
        );
}

/// Malformed form bodies are reported like any other validation error
fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req| {
        ApiError::from(ClinicError::Validation(format!("Invalid form submission: {err}"))).into()
    })
}
