//! Request handlers
//!
//! Form submissions are `application/x-www-form-urlencoded`; every response is
//! JSON. Successful submissions carry the screen the caller should go to next.

use super::error::ApiError;
use super::extract::CurrentSession;
use super::state::AppState;
use crate::core::identity::SignupForm;
use crate::core::workflows::{BookingForm, DiagnosisForm, ForgotPasswordForm, LoginForm};
use crate::domain::Redirect;
use actix_web::{web, HttpResponse};
use serde_json::json;

type HandlerResult = Result<HttpResponse, ApiError>;

pub async fn index(session: CurrentSession) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "service": "MedTrack",
        "version": env!("CARGO_PKG_VERSION"),
        "role": session.role(),
    }))
}

pub async fn signup_form() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "form": "signup",
        "roles": ["patient", "doctor"],
        "fields": [
            "userType", "name", "email", "password", "confirm_password",
            "patient_age", "doctor_age", "address", "specialization", "mobile"
        ],
    }))
}

pub async fn signup(state: web::Data<AppState>, form: web::Form<SignupForm>) -> HandlerResult {
    let user_id = state.clinic.signup(form.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Signup successful! Please log in.",
        "user_id": user_id,
        "redirect": Redirect::Login.path(),
    })))
}

pub async fn login_form() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "form": "login",
        "roles": ["patient", "doctor"],
        "fields": ["role", "email", "password"],
    }))
}

pub async fn login(
    state: web::Data<AppState>,
    current: CurrentSession,
    form: web::Form<LoginForm>,
) -> HandlerResult {
    let session = state.clinic.login(form.into_inner()).await?;
    let role = session.role;

    // A fresh login replaces whatever session the browser held
    if let Some(old) = current.token() {
        state.sessions.clear(old).await;
    }
    let token = state.sessions.establish(session).await;

    Ok(HttpResponse::Ok()
        .cookie(state.cookies.session_cookie(token))
        .json(json!({
            "message": "Login successful!",
            "role": role,
            "redirect": Redirect::dashboard(Some(role)).path(),
        })))
}

pub async fn logout(state: web::Data<AppState>, current: CurrentSession) -> HttpResponse {
    if let Some(token) = current.token() {
        state.sessions.clear(token).await;
    }
    tracing::info!(role = ?current.role(), "Logged out");

    HttpResponse::Ok()
        .cookie(state.cookies.removal_cookie())
        .json(json!({
            "message": "Logged out successfully.",
            "redirect": Redirect::Login.path(),
        }))
}

pub async fn patient_dashboard(state: web::Data<AppState>, current: CurrentSession) -> HandlerResult {
    let dashboard = state
        .clinic
        .patient_dashboard(current.get())
        .await
        .map_err(|e| current.error(e))?;
    Ok(HttpResponse::Ok().json(dashboard))
}

pub async fn doctor_dashboard(state: web::Data<AppState>, current: CurrentSession) -> HandlerResult {
    let dashboard = state
        .clinic
        .doctor_dashboard(current.get())
        .await
        .map_err(|e| current.error(e))?;
    Ok(HttpResponse::Ok().json(dashboard))
}

pub async fn booking_options(state: web::Data<AppState>, current: CurrentSession) -> HandlerResult {
    let doctors = state
        .clinic
        .booking_options(current.get())
        .await
        .map_err(|e| current.error(e))?;
    Ok(HttpResponse::Ok().json(json!({ "doctors": doctors })))
}

pub async fn book_appointment(
    state: web::Data<AppState>,
    current: CurrentSession,
    form: web::Form<BookingForm>,
) -> HandlerResult {
    let appointment_id = state
        .clinic
        .book_appointment(current.get(), form.into_inner())
        .await
        .map_err(|e| current.error(e))?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Appointment booked successfully! Notification sent to doctor.",
        "appointment_id": appointment_id,
        "redirect": Redirect::PatientDashboard.path(),
    })))
}

pub async fn view_appointment_patient(
    state: web::Data<AppState>,
    current: CurrentSession,
    path: web::Path<String>,
) -> HandlerResult {
    let view = state
        .clinic
        .view_appointment_as_patient(current.get(), &path)
        .await
        .map_err(|e| current.error(e))?;
    Ok(HttpResponse::Ok().json(view))
}

pub async fn view_appointment_doctor(
    state: web::Data<AppState>,
    current: CurrentSession,
    path: web::Path<String>,
) -> HandlerResult {
    let view = state
        .clinic
        .view_appointment_as_doctor(current.get(), &path)
        .await
        .map_err(|e| current.error(e))?;
    Ok(HttpResponse::Ok().json(view))
}

pub async fn submit_diagnosis(
    state: web::Data<AppState>,
    current: CurrentSession,
    path: web::Path<String>,
    form: web::Form<DiagnosisForm>,
) -> HandlerResult {
    state
        .clinic
        .submit_diagnosis(current.get(), &path, form.into_inner())
        .await
        .map_err(|e| current.error(e))?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Diagnosis submitted successfully.",
        "redirect": Redirect::DoctorDashboard.path(),
    })))
}

pub async fn patient_profile(state: web::Data<AppState>, current: CurrentSession) -> HandlerResult {
    let profile = state
        .clinic
        .patient_profile(current.get())
        .await
        .map_err(|e| current.error(e))?;
    Ok(HttpResponse::Ok().json(profile))
}

pub async fn doctor_profile(state: web::Data<AppState>, current: CurrentSession) -> HandlerResult {
    let profile = state
        .clinic
        .doctor_profile(current.get())
        .await
        .map_err(|e| current.error(e))?;
    Ok(HttpResponse::Ok().json(profile))
}

pub async fn forgot_password_form() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "form": "forgot-password",
        "fields": ["email"],
    }))
}

pub async fn forgot_password(
    state: web::Data<AppState>,
    form: web::Form<ForgotPasswordForm>,
) -> HttpResponse {
    let outcome = state.clinic.forgot_password(form.into_inner()).await;

    HttpResponse::Ok().json(json!({
        "message": outcome.message,
        "simulated": outcome.simulated,
        "redirect": Redirect::Login.path(),
    }))
}
