//! End-to-end tests of the clinic workflows through the library API

use async_trait::async_trait;
use medtrack::adapters::notify::{
    HttpMailNotifier, LogNotifier, Notification, NotificationGateway, Notifier,
};
use medtrack::config::{secret_string, NotificationConfig, RetryConfig};
use medtrack::core::identity::{BcryptHasher, SignupForm};
use medtrack::core::session::Session;
use medtrack::core::workflows::{BookingForm, Clinic, DiagnosisForm, LoginForm};
use medtrack::domain::{AppointmentStatus, ClinicError, Result, Role, UserId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Notifier that always fails
struct BrokenRelay {
    attempts: AtomicUsize,
}

#[async_trait]
impl Notifier for BrokenRelay {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn send(&self, _notification: &Notification) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(ClinicError::Notification("relay unreachable".to_string()))
    }
}

fn clinic_with(notifier: Arc<dyn Notifier>) -> Clinic {
    let gateway = NotificationGateway::new(notifier, Duration::from_secs(2));
    Clinic::new(Arc::new(BcryptHasher::new(4)), gateway)
}

fn signup(role: &str, email: &str) -> SignupForm {
    SignupForm {
        user_type: Some(role.to_string()),
        name: Some(email.split('@').next().unwrap_or("user").to_string()),
        email: Some(email.to_string()),
        password: Some(secret_string("pw-123456".to_string())),
        confirm_password: Some(secret_string("pw-123456".to_string())),
        ..Default::default()
    }
}

fn login(role: &str, email: &str) -> LoginForm {
    LoginForm {
        role: Some(role.to_string()),
        email: Some(email.to_string()),
        password: Some(secret_string("pw-123456".to_string())),
    }
}

fn booking(doctor_id: UserId) -> BookingForm {
    BookingForm {
        doctor_id: Some(doctor_id.to_string()),
        appointment_date: Some("2024-05-01".to_string()),
        appointment_time: Some("10:00".to_string()),
        symptoms: Some("fever".to_string()),
    }
}

/// Register, book, diagnose; returns the final patient dashboard counts
async fn run_scenario(clinic: &Clinic) -> (usize, usize, usize) {
    clinic.signup(signup("patient", "p@x.com")).await.unwrap();
    let doctor_id = clinic.signup(signup("doctor", "d@x.com")).await.unwrap();

    let patient = clinic.login(login("patient", "p@x.com")).await.unwrap();
    let appointment_id = clinic
        .book_appointment(Some(&patient), booking(doctor_id))
        .await
        .unwrap();

    let dashboard = clinic.patient_dashboard(Some(&patient)).await.unwrap();
    assert_eq!(dashboard.summary.total, 1);
    assert_eq!(dashboard.summary.pending, 1);
    assert_eq!(dashboard.summary.completed, 0);

    let doctor = clinic.login(login("doctor", "d@x.com")).await.unwrap();
    let doctor_dashboard = clinic.doctor_dashboard(Some(&doctor)).await.unwrap();
    assert_eq!(doctor_dashboard.appointments.len(), 1);
    assert_eq!(doctor_dashboard.appointments[0].id(), appointment_id);

    clinic
        .submit_diagnosis(
            Some(&doctor),
            &appointment_id.to_string(),
            DiagnosisForm {
                diagnosis: Some("flu".to_string()),
                treatment_plan: Some("rest".to_string()),
                prescription: Some("fluids".to_string()),
            },
        )
        .await
        .unwrap();

    let dashboard = clinic.patient_dashboard(Some(&patient)).await.unwrap();
    let appointment = &dashboard.appointments[0];
    assert_eq!(appointment.status(), AppointmentStatus::Completed);
    assert_eq!(appointment.diagnosis().unwrap().diagnosis, "flu");

    (
        dashboard.summary.total,
        dashboard.summary.pending,
        dashboard.summary.completed,
    )
}

#[tokio::test]
async fn test_end_to_end_booking_scenario() {
    let clinic = clinic_with(Arc::new(LogNotifier));
    assert_eq!(run_scenario(&clinic).await, (1, 0, 1));
}

#[tokio::test]
async fn test_failing_notifications_do_not_affect_booking() {
    let relay = Arc::new(BrokenRelay {
        attempts: AtomicUsize::new(0),
    });
    let clinic = clinic_with(relay.clone());

    assert_eq!(run_scenario(&clinic).await, (1, 0, 1));

    // The notice was attempted even though it failed
    for _ in 0..50 {
        if relay.attempts.load(Ordering::SeqCst) > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(relay.attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_booking_notice_reaches_mail_relay() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_header("authorization", "Bearer relay-key")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "to": "d@x.com",
            "subject": "New Appointment Booked",
        })))
        .with_status(200)
        .create_async()
        .await;

    let config = NotificationConfig {
        enabled: true,
        endpoint: format!("{}/v1/messages", server.url()),
        api_key: Some(secret_string("relay-key".to_string())),
        sender: "clinic@example.com".to_string(),
        timeout_seconds: 5,
        request_timeout_seconds: 2,
        retry: RetryConfig {
            max_retries: 0,
            ..Default::default()
        },
    };
    let clinic = clinic_with(Arc::new(HttpMailNotifier::new(&config).unwrap()));

    clinic.signup(signup("patient", "p@x.com")).await.unwrap();
    let doctor_id = clinic.signup(signup("doctor", "d@x.com")).await.unwrap();
    let patient = Session::new("p@x.com", Role::Patient);
    clinic
        .book_appointment(Some(&patient), booking(doctor_id))
        .await
        .unwrap();

    for _ in 0..50 {
        if mock.matched_async().await {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_duplicate_email_leaves_store_unchanged() {
    let clinic = clinic_with(Arc::new(LogNotifier));
    clinic.signup(signup("patient", "p@x.com")).await.unwrap();

    let err = clinic.signup(signup("patient", "p@x.com")).await.unwrap_err();
    assert!(matches!(err, ClinicError::DuplicateEmail(_)));

    // Original credentials still work, and only one account exists
    assert!(clinic.login(login("patient", "p@x.com")).await.is_ok());
}

#[tokio::test]
async fn test_login_errors_are_indistinguishable() {
    let clinic = clinic_with(Arc::new(LogNotifier));
    clinic.signup(signup("doctor", "d@x.com")).await.unwrap();

    let wrong_role = clinic.login(login("patient", "d@x.com")).await.unwrap_err();
    let unknown = clinic.login(login("doctor", "nobody@x.com")).await.unwrap_err();
    let bad_password = clinic
        .login(LoginForm {
            password: Some(secret_string("wrong".to_string())),
            ..login("doctor", "d@x.com")
        })
        .await
        .unwrap_err();

    let messages: Vec<String> = [wrong_role, unknown, bad_password]
        .iter()
        .map(|e| e.user_message())
        .collect();
    assert!(messages.iter().all(|m| m == &messages[0]));
}

#[tokio::test]
async fn test_failed_logins_take_comparable_time() {
    let gateway = NotificationGateway::new(Arc::new(LogNotifier), Duration::from_secs(2));
    let clinic = Clinic::new(Arc::new(BcryptHasher::new(8)), gateway);
    clinic.signup(signup("doctor", "d@x.com")).await.unwrap();

    // First miss computes the decoy digest
    clinic.login(login("patient", "d@x.com")).await.unwrap_err();

    async fn average(clinic: &Clinic, form: impl Fn() -> LoginForm) -> Duration {
        let start = Instant::now();
        for _ in 0..5 {
            assert!(matches!(
                clinic.login(form()).await,
                Err(ClinicError::InvalidCredentials)
            ));
        }
        start.elapsed() / 5
    }

    let wrong_role = average(&clinic, || login("patient", "d@x.com")).await;
    let unknown = average(&clinic, || login("doctor", "nobody@x.com")).await;
    let wrong_password = average(&clinic, || LoginForm {
        password: Some(secret_string("wrong".to_string())),
        ..login("doctor", "d@x.com")
    })
    .await;

    assert!(wrong_role * 3 > wrong_password, "{wrong_role:?} vs {wrong_password:?}");
    assert!(unknown * 3 > wrong_password, "{unknown:?} vs {wrong_password:?}");
}

#[tokio::test]
async fn test_patient_cannot_view_another_patients_appointment() {
    let clinic = clinic_with(Arc::new(LogNotifier));
    clinic.signup(signup("patient", "p@x.com")).await.unwrap();
    clinic.signup(signup("patient", "q@x.com")).await.unwrap();
    let doctor_id = clinic.signup(signup("doctor", "d@x.com")).await.unwrap();

    let owner = clinic.login(login("patient", "p@x.com")).await.unwrap();
    let intruder = clinic.login(login("patient", "q@x.com")).await.unwrap();
    let id = clinic
        .book_appointment(Some(&owner), booking(doctor_id))
        .await
        .unwrap()
        .to_string();

    let view = clinic
        .view_appointment_as_patient(Some(&owner), &id)
        .await
        .unwrap();
    assert_eq!(view.doctor.email, "d@x.com");

    let err = clinic
        .view_appointment_as_patient(Some(&intruder), &id)
        .await
        .unwrap_err();
    assert!(matches!(err, ClinicError::AccessDenied));

    // The intruder's dashboard stays empty
    let dashboard = clinic.patient_dashboard(Some(&intruder)).await.unwrap();
    assert_eq!(dashboard.summary.total, 0);
}

#[tokio::test]
async fn test_concurrent_bookings_are_all_recorded() {
    let clinic = Arc::new(clinic_with(Arc::new(LogNotifier)));
    clinic.signup(signup("patient", "p@x.com")).await.unwrap();
    let doctor_id = clinic.signup(signup("doctor", "d@x.com")).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..20 {
        let clinic = Arc::clone(&clinic);
        handles.push(tokio::spawn(async move {
            let patient = Session::new("p@x.com", Role::Patient);
            clinic
                .book_appointment(Some(&patient), booking(doctor_id))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let doctor = Session::new("d@x.com", Role::Doctor);
    let dashboard = clinic.doctor_dashboard(Some(&doctor)).await.unwrap();
    assert_eq!(dashboard.summary.total, 20);
    assert_eq!(dashboard.summary.pending, 20);
}
