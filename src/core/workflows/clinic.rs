//! Clinic workflows
//!
//! [`Clinic`] composes the identity store, the appointment ledger and the
//! notification gateway. Both stores sit behind one `RwLock`; every mutation
//! happens under the write guard and reads see a consistent snapshot. Password
//! hashing and notice delivery never run while the lock is held.

use super::forms::{BookingForm, DiagnosisForm, ForgotPasswordForm, LoginForm};
use super::views::{
    Dashboard, DoctorAppointmentView, ForgotPasswordOutcome, PatientAppointmentView,
};
use crate::adapters::notify::{create_notifier, NotificationGateway};
use crate::config::MedTrackConfig;
use crate::core::identity::{
    BcryptHasher, IdentityStore, PasswordHasher, Registration, SignupForm,
};
use crate::core::ledger::{AppointmentLedger, AppointmentSummary};
use crate::core::session::Session;
use crate::domain::{
    AppointmentId, ClinicError, Diagnosis, DoctorListing, NewAppointment, PasswordDigest,
    PublicProfile, Result, Role, User, UserId,
};
use secrecy::ExposeSecret;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OnceCell, RwLock};

const APPOINTMENT_NOT_FOUND: &str = "Appointment not found.";
const DOCTOR_NOT_FOUND: &str = "Doctor not found.";
const BOOKING_FIELDS_REQUIRED: &str = "Please select a doctor, date and time.";
const DECOY_PASSWORD: &str = "medtrack-login-decoy";

/// Process-wide clinic state
#[derive(Debug, Default)]
struct Records {
    users: IdentityStore,
    appointments: AppointmentLedger,
}

/// Composition layer over the stores
pub struct Clinic {
    records: RwLock<Records>,
    hasher: Arc<dyn PasswordHasher>,
    /// Verified against when no account matches, so every failed login costs one hash
    decoy_digest: OnceCell<PasswordDigest>,
    notifications: NotificationGateway,
    enforce_doctor_ownership: bool,
}

impl Clinic {
    /// Create an empty clinic
    ///
    /// Doctor ownership is not enforced unless enabled with
    /// [`Clinic::with_doctor_ownership`].
    pub fn new(hasher: Arc<dyn PasswordHasher>, notifications: NotificationGateway) -> Self {
        Self {
            records: RwLock::new(Records::default()),
            hasher,
            decoy_digest: OnceCell::new(),
            notifications,
            enforce_doctor_ownership: false,
        }
    }

    /// Restrict the doctor view and diagnosis submission to the assigned doctor
    pub fn with_doctor_ownership(mut self, enforce: bool) -> Self {
        self.enforce_doctor_ownership = enforce;
        self
    }

    /// Build a clinic from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured notifier cannot be created
    pub fn from_config(config: &MedTrackConfig) -> Result<Self> {
        let hasher = Arc::new(BcryptHasher::new(config.security.bcrypt_cost));
        let notifier = create_notifier(&config.notifications)?;
        let gateway = NotificationGateway::new(
            notifier,
            Duration::from_secs(config.notifications.timeout_seconds),
        );

        if !config.security.enforce_doctor_ownership {
            tracing::warn!(
                "Doctor ownership is not enforced: any doctor may view or complete any appointment"
            );
        }

        Ok(Self::new(hasher, gateway)
            .with_doctor_ownership(config.security.enforce_doctor_ownership))
    }

    /// Register a new patient or doctor
    ///
    /// # Errors
    ///
    /// - `ClinicError::Validation` for blank or mismatched fields
    /// - `ClinicError::DuplicateEmail` if the email is taken
    pub async fn signup(&self, form: SignupForm) -> Result<UserId> {
        let registration = Registration::from_form(form)?;

        if self.records.read().await.users.contains_email(&registration.email) {
            tracing::info!(role = %registration.role(), "Signup rejected: email already registered");
            return Err(ClinicError::DuplicateEmail(registration.email));
        }

        let digest = self
            .hasher
            .hash(registration.password.expose_secret().as_ref())
            .await?;
        let role = registration.role();

        // The store re-checks the email under the write lock
        let user_id = self
            .records
            .write()
            .await
            .users
            .register(registration, digest)?;

        tracing::info!(user_id = %user_id, role = %role, "User registered");
        Ok(user_id)
    }

    /// Authenticate with a declared role
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::InvalidCredentials` for any unknown email, role
    /// mismatch, wrong password or missing field.
    pub async fn login(&self, form: LoginForm) -> Result<Session> {
        let (Some(role), Some(email), Some(password)) = (form.role, form.email, form.password)
        else {
            return Err(ClinicError::InvalidCredentials);
        };
        let role = Role::from_str(&role).ok();

        let candidate = match role {
            Some(role) => {
                let records = self.records.read().await;
                records
                    .users
                    .find_for_login(role, &email)
                    .map(|u| (u.id, u.password_digest.clone()))
            }
            None => None,
        };

        // Unknown emails and role mismatches pay for a verification too
        let digest = match &candidate {
            Some((_, digest)) => digest.clone(),
            None => self.decoy_digest().await?.clone(),
        };
        let verified = self
            .hasher
            .verify(password.expose_secret().as_ref(), &digest)
            .await?;

        let (Some(role), Some((user_id, _)), true) = (role, candidate, verified) else {
            tracing::info!(role = ?role, "Login failed");
            return Err(ClinicError::InvalidCredentials);
        };

        tracing::info!(user_id = %user_id, role = %role, "Login successful");
        Ok(Session::new(email, role))
    }

    async fn decoy_digest(&self) -> Result<&PasswordDigest> {
        self.decoy_digest
            .get_or_try_init(|| self.hasher.hash(DECOY_PASSWORD))
            .await
    }

    /// Resolve the session user for a role-scoped workflow
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::Unauthorized` if there is no session, the session
    /// role differs, or the session email no longer resolves to a user of that role.
    pub async fn require(&self, session: Option<&Session>, role: Role) -> Result<User> {
        let records = self.records.read().await;
        authorize(&records.users, session, role).cloned()
    }

    /// Patient dashboard: own appointments, counts and the doctor directory
    pub async fn patient_dashboard(&self, session: Option<&Session>) -> Result<Dashboard> {
        let records = self.records.read().await;
        let patient = authorize(&records.users, session, Role::Patient)?;

        let appointments = records.appointments.list_for_patient(&patient.email);
        let summary = AppointmentSummary::from_appointments(appointments.iter().copied());

        Ok(Dashboard {
            user: patient.public_profile(),
            appointments: appointments.into_iter().cloned().collect(),
            summary,
            doctors: records.users.doctors().map(DoctorListing::from).collect(),
        })
    }

    /// Doctor dashboard: assigned appointments and counts
    pub async fn doctor_dashboard(&self, session: Option<&Session>) -> Result<Dashboard> {
        let records = self.records.read().await;
        let doctor = authorize(&records.users, session, Role::Doctor)?;

        let appointments = records.appointments.list_for_doctor(&doctor.id);
        let summary = AppointmentSummary::from_appointments(appointments.iter().copied());

        Ok(Dashboard {
            user: doctor.public_profile(),
            appointments: appointments.into_iter().cloned().collect(),
            summary,
            doctors: Vec::new(),
        })
    }

    /// Doctors a patient can book with
    pub async fn booking_options(&self, session: Option<&Session>) -> Result<Vec<DoctorListing>> {
        let records = self.records.read().await;
        authorize(&records.users, session, Role::Patient)?;
        Ok(records.users.doctors().map(DoctorListing::from).collect())
    }

    /// Book an appointment and notify the doctor
    ///
    /// The booking is committed before the notice is dispatched; the notice
    /// outcome never affects the result.
    ///
    /// # Errors
    ///
    /// - `ClinicError::Unauthorized` without a patient session
    /// - `ClinicError::Validation` if doctor, date or time is missing
    /// - `ClinicError::NotFound` if the doctor does not resolve
    pub async fn book_appointment(
        &self,
        session: Option<&Session>,
        form: BookingForm,
    ) -> Result<AppointmentId> {
        let (Some(doctor_id), Some(date), Some(time)) = (
            non_blank(form.doctor_id),
            non_blank(form.appointment_date),
            non_blank(form.appointment_time),
        ) else {
            // Session is checked first so an anonymous caller is sent to login
            self.require(session, Role::Patient).await?;
            return Err(ClinicError::Validation(BOOKING_FIELDS_REQUIRED.to_string()));
        };
        let symptoms = form.symptoms.unwrap_or_default();

        let (appointment_id, doctor_email) = {
            let mut guard = self.records.write().await;
            let Records {
                users,
                appointments,
            } = &mut *guard;

            let patient_id = authorize(users, session, Role::Patient)?.id;
            let doctor_id = UserId::from_str(&doctor_id)
                .map_err(|_| ClinicError::NotFound(DOCTOR_NOT_FOUND.to_string()))?;
            let doctor_email = users
                .doctor(&doctor_id)
                .map(|d| d.email.clone())
                .ok_or_else(|| ClinicError::NotFound(DOCTOR_NOT_FOUND.to_string()))?;

            let appointment_id = appointments.create(
                users,
                NewAppointment {
                    patient_id,
                    doctor_id,
                    date: date.clone(),
                    time: time.clone(),
                    symptoms: symptoms.clone(),
                },
            )?;

            tracing::info!(
                appointment_id = %appointment_id,
                patient_id = %patient_id,
                doctor_id = %doctor_id,
                "Appointment booked"
            );
            (appointment_id, doctor_email)
        };

        self.notifications
            .booking_notice(&doctor_email, &date, &time, &symptoms);

        Ok(appointment_id)
    }

    /// Record a diagnosis and complete the appointment
    ///
    /// A second submission overwrites the first.
    ///
    /// # Errors
    ///
    /// - `ClinicError::Unauthorized` without a doctor session
    /// - `ClinicError::NotFound` for an unknown appointment
    /// - `ClinicError::AccessDenied` if ownership is enforced and the appointment
    ///   belongs to another doctor
    pub async fn submit_diagnosis(
        &self,
        session: Option<&Session>,
        appointment_id: &str,
        form: DiagnosisForm,
    ) -> Result<()> {
        let mut guard = self.records.write().await;
        let Records {
            users,
            appointments,
        } = &mut *guard;

        let doctor_id = authorize(users, session, Role::Doctor)?.id;
        let appointment_id = parse_appointment_id(appointment_id)?;
        let assigned = appointments
            .get(&appointment_id)
            .map(|a| a.doctor_id())
            .ok_or_else(|| ClinicError::NotFound(APPOINTMENT_NOT_FOUND.to_string()))?;

        if self.enforce_doctor_ownership && assigned != doctor_id {
            tracing::warn!(
                appointment_id = %appointment_id,
                doctor_id = %doctor_id,
                "Diagnosis rejected: appointment assigned to another doctor"
            );
            return Err(ClinicError::AccessDenied);
        }

        let replaced = appointments.submit_diagnosis(&appointment_id, Diagnosis::from(form))?;
        if replaced.is_some() {
            tracing::warn!(
                appointment_id = %appointment_id,
                doctor_id = %doctor_id,
                "Overwrote diagnosis of a completed appointment"
            );
        }

        tracing::info!(
            appointment_id = %appointment_id,
            doctor_id = %doctor_id,
            "Diagnosis submitted"
        );
        Ok(())
    }

    /// Appointment detail for the patient who booked it
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::AccessDenied` for an unknown appointment or one booked
    /// by another patient.
    pub async fn view_appointment_as_patient(
        &self,
        session: Option<&Session>,
        appointment_id: &str,
    ) -> Result<PatientAppointmentView> {
        let records = self.records.read().await;
        let patient = authorize(&records.users, session, Role::Patient)?;

        let appointment = AppointmentId::from_str(appointment_id)
            .ok()
            .and_then(|id| records.appointments.get(&id))
            .filter(|a| a.patient_email() == patient.email)
            .ok_or(ClinicError::AccessDenied)?;

        let doctor = counterpart(&records.users, &appointment.doctor_id())?;

        Ok(PatientAppointmentView {
            appointment: appointment.clone(),
            doctor,
        })
    }

    /// Appointment detail for a doctor
    ///
    /// Any doctor may view any appointment unless ownership is enforced.
    pub async fn view_appointment_as_doctor(
        &self,
        session: Option<&Session>,
        appointment_id: &str,
    ) -> Result<DoctorAppointmentView> {
        let records = self.records.read().await;
        let doctor = authorize(&records.users, session, Role::Doctor)?;

        let appointment_id = parse_appointment_id(appointment_id)?;
        let appointment = records
            .appointments
            .get(&appointment_id)
            .ok_or_else(|| ClinicError::NotFound(APPOINTMENT_NOT_FOUND.to_string()))?;

        if appointment.doctor_id() != doctor.id {
            if self.enforce_doctor_ownership {
                return Err(ClinicError::AccessDenied);
            }
            tracing::debug!(
                appointment_id = %appointment_id,
                doctor_id = %doctor.id,
                "Doctor viewed an appointment assigned to another doctor"
            );
        }

        let patient = counterpart(&records.users, &appointment.patient_id())?;

        Ok(DoctorAppointmentView {
            appointment: appointment.clone(),
            patient,
        })
    }

    pub async fn patient_profile(&self, session: Option<&Session>) -> Result<PublicProfile> {
        self.require(session, Role::Patient)
            .await
            .map(|u| u.public_profile())
    }

    pub async fn doctor_profile(&self, session: Option<&Session>) -> Result<PublicProfile> {
        self.require(session, Role::Doctor)
            .await
            .map(|u| u.public_profile())
    }

    /// Simulated password reset
    ///
    /// Nothing is issued or changed. The outcome is the same for registered and
    /// unknown emails.
    pub async fn forgot_password(&self, form: ForgotPasswordForm) -> ForgotPasswordOutcome {
        let registered = match form.email {
            Some(email) => self.records.read().await.users.find_by_email(&email).is_some(),
            None => false,
        };
        tracing::info!(registered = registered, "Password reset requested (simulated)");
        ForgotPasswordOutcome::simulated()
    }
}

fn authorize<'a>(users: &'a IdentityStore, session: Option<&Session>, role: Role) -> Result<&'a User> {
    let unauthorized = || ClinicError::Unauthorized(format!("Please log in as a {role}."));

    let session = session.ok_or_else(unauthorized)?;
    if session.role != role {
        return Err(unauthorized());
    }

    users
        .find_for_login(role, &session.user_email)
        .ok_or_else(unauthorized)
}

fn counterpart(users: &IdentityStore, id: &UserId) -> Result<PublicProfile> {
    users
        .get(id)
        .map(User::public_profile)
        .ok_or_else(|| ClinicError::Internal(format!("dangling user reference {id}")))
}

fn parse_appointment_id(raw: &str) -> Result<AppointmentId> {
    AppointmentId::from_str(raw)
        .map_err(|_| ClinicError::NotFound(APPOINTMENT_NOT_FOUND.to_string()))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::notify::LogNotifier;
    use crate::config::secret_string;
    use crate::domain::AppointmentStatus;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn clinic() -> Clinic {
        let gateway = NotificationGateway::new(Arc::new(LogNotifier), Duration::from_secs(1));
        Clinic::new(Arc::new(BcryptHasher::new(4)), gateway)
    }

    fn signup_form(role: &str, email: &str) -> SignupForm {
        SignupForm {
            user_type: Some(role.to_string()),
            name: Some(format!("{role} user")),
            email: Some(email.to_string()),
            password: Some(secret_string("secret1".to_string())),
            confirm_password: Some(secret_string("secret1".to_string())),
            specialization: (role == "doctor").then(|| "General".to_string()),
            ..Default::default()
        }
    }

    fn login_form(role: &str, email: &str, password: &str) -> LoginForm {
        LoginForm {
            role: Some(role.to_string()),
            email: Some(email.to_string()),
            password: Some(secret_string(password.to_string())),
        }
    }

    fn booking(doctor_id: UserId) -> BookingForm {
        BookingForm {
            doctor_id: Some(doctor_id.to_string()),
            appointment_date: Some("2024-05-01".to_string()),
            appointment_time: Some("10:00".to_string()),
            symptoms: Some("cough".to_string()),
        }
    }

    async fn seeded() -> (Clinic, UserId, UserId) {
        let clinic = clinic();
        let patient = clinic.signup(signup_form("patient", "p@x.com")).await.unwrap();
        let doctor = clinic.signup(signup_form("doctor", "d@x.com")).await.unwrap();
        (clinic, patient, doctor)
    }

    #[tokio::test]
    async fn test_duplicate_signup_rejected() {
        let (clinic, _, _) = seeded().await;
        let err = clinic
            .signup(signup_form("doctor", "p@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClinicError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn test_login_requires_matching_role() {
        let (clinic, _, _) = seeded().await;

        let session = clinic
            .login(login_form("patient", "p@x.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(session, Session::new("p@x.com", Role::Patient));

        let wrong_role = clinic
            .login(login_form("doctor", "p@x.com", "secret1"))
            .await
            .unwrap_err();
        let wrong_password = clinic
            .login(login_form("patient", "p@x.com", "nope"))
            .await
            .unwrap_err();
        let unknown = clinic
            .login(login_form("patient", "q@x.com", "secret1"))
            .await
            .unwrap_err();

        for err in [wrong_role, wrong_password, unknown] {
            assert!(matches!(err, ClinicError::InvalidCredentials));
        }
    }

    /// Bcrypt hasher that counts verifications
    struct CountingHasher {
        inner: BcryptHasher,
        hashes: AtomicUsize,
        verifies: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl PasswordHasher for CountingHasher {
        async fn hash(&self, password: &str) -> Result<PasswordDigest> {
            self.hashes.fetch_add(1, Ordering::SeqCst);
            self.inner.hash(password).await
        }

        async fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool> {
            self.verifies.fetch_add(1, Ordering::SeqCst);
            self.inner.verify(password, digest).await
        }
    }

    #[tokio::test]
    async fn test_every_failed_login_runs_one_verification() {
        let hasher = Arc::new(CountingHasher {
            inner: BcryptHasher::new(4),
            hashes: AtomicUsize::new(0),
            verifies: AtomicUsize::new(0),
        });
        let gateway = NotificationGateway::new(Arc::new(LogNotifier), Duration::from_secs(1));
        let clinic = Clinic::new(hasher.clone(), gateway);
        clinic.signup(signup_form("doctor", "d@x.com")).await.unwrap();
        let signup_hashes = hasher.hashes.load(Ordering::SeqCst);

        let attempts = [
            login_form("patient", "d@x.com", "secret1"),
            login_form("doctor", "nobody@x.com", "secret1"),
            login_form("nurse", "d@x.com", "secret1"),
            login_form("doctor", "d@x.com", "nope"),
        ];
        for (i, form) in attempts.into_iter().enumerate() {
            let err = clinic.login(form).await.unwrap_err();
            assert!(matches!(err, ClinicError::InvalidCredentials));
            assert_eq!(hasher.verifies.load(Ordering::SeqCst), i + 1);
        }

        // The decoy digest is computed once and reused
        assert_eq!(hasher.hashes.load(Ordering::SeqCst), signup_hashes + 1);
    }

    #[tokio::test]
    async fn test_require_rejects_wrong_role_and_stale_session() {
        let (clinic, _, _) = seeded().await;
        let patient = Session::new("p@x.com", Role::Patient);

        assert!(clinic.require(Some(&patient), Role::Patient).await.is_ok());
        assert!(matches!(
            clinic.require(Some(&patient), Role::Doctor).await,
            Err(ClinicError::Unauthorized(_))
        ));
        assert!(matches!(
            clinic.require(None, Role::Patient).await,
            Err(ClinicError::Unauthorized(_))
        ));

        let ghost = Session::new("ghost@x.com", Role::Patient);
        assert!(matches!(
            clinic.require(Some(&ghost), Role::Patient).await,
            Err(ClinicError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_booking_appears_on_both_dashboards() {
        let (clinic, _, doctor_id) = seeded().await;
        let patient = Session::new("p@x.com", Role::Patient);
        let doctor = Session::new("d@x.com", Role::Doctor);

        let id = clinic
            .book_appointment(Some(&patient), booking(doctor_id))
            .await
            .unwrap();

        let dashboard = clinic.patient_dashboard(Some(&patient)).await.unwrap();
        assert_eq!(dashboard.summary.total, 1);
        assert_eq!(dashboard.summary.pending, 1);
        assert_eq!(dashboard.appointments[0].id(), id);
        assert_eq!(dashboard.appointments[0].status(), AppointmentStatus::Pending);
        assert_eq!(dashboard.doctors.len(), 1);

        let dashboard = clinic.doctor_dashboard(Some(&doctor)).await.unwrap();
        assert_eq!(dashboard.appointments.len(), 1);
        assert!(dashboard.doctors.is_empty());
    }

    #[tokio::test]
    async fn test_booking_validation() {
        let (clinic, patient_id, _) = seeded().await;
        let patient = Session::new("p@x.com", Role::Patient);

        let mut missing_time = booking(patient_id);
        missing_time.appointment_time = Some("  ".to_string());
        assert!(matches!(
            clinic.book_appointment(Some(&patient), missing_time).await,
            Err(ClinicError::Validation(_))
        ));

        // A patient identifier is not a doctor
        assert!(matches!(
            clinic.book_appointment(Some(&patient), booking(patient_id)).await,
            Err(ClinicError::NotFound(_))
        ));

        let mut garbage = booking(patient_id);
        garbage.doctor_id = Some("3".to_string());
        assert!(matches!(
            clinic.book_appointment(Some(&patient), garbage).await,
            Err(ClinicError::NotFound(_))
        ));

        assert!(matches!(
            clinic.book_appointment(None, BookingForm::default()).await,
            Err(ClinicError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_diagnosis_completes_and_overwrites() {
        let (clinic, _, doctor_id) = seeded().await;
        let patient = Session::new("p@x.com", Role::Patient);
        let doctor = Session::new("d@x.com", Role::Doctor);
        let id = clinic
            .book_appointment(Some(&patient), booking(doctor_id))
            .await
            .unwrap()
            .to_string();

        for text in ["flu", "cold"] {
            let form = DiagnosisForm {
                diagnosis: Some(text.to_string()),
                ..Default::default()
            };
            clinic
                .submit_diagnosis(Some(&doctor), &id, form)
                .await
                .unwrap();
        }

        let view = clinic
            .view_appointment_as_patient(Some(&patient), &id)
            .await
            .unwrap();
        assert!(view.appointment.is_completed());
        assert_eq!(view.appointment.diagnosis().unwrap().diagnosis, "cold");
        assert_eq!(view.doctor.email, "d@x.com");

        let missing = AppointmentId::generate().to_string();
        assert!(matches!(
            clinic
                .submit_diagnosis(Some(&doctor), &missing, DiagnosisForm::default())
                .await,
            Err(ClinicError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_patient_view_is_owner_only() {
        let (clinic, _, doctor_id) = seeded().await;
        clinic.signup(signup_form("patient", "q@x.com")).await.unwrap();
        let owner = Session::new("p@x.com", Role::Patient);
        let other = Session::new("q@x.com", Role::Patient);

        let id = clinic
            .book_appointment(Some(&owner), booking(doctor_id))
            .await
            .unwrap()
            .to_string();

        assert!(clinic.view_appointment_as_patient(Some(&owner), &id).await.is_ok());
        assert!(matches!(
            clinic.view_appointment_as_patient(Some(&other), &id).await,
            Err(ClinicError::AccessDenied)
        ));
        assert!(matches!(
            clinic.view_appointment_as_patient(Some(&owner), "unknown").await,
            Err(ClinicError::AccessDenied)
        ));
    }

    #[tokio::test]
    async fn test_doctor_ownership_switch() {
        let (clinic, _, doctor_id) = seeded().await;
        let clinic = clinic.with_doctor_ownership(true);
        clinic.signup(signup_form("doctor", "e@x.com")).await.unwrap();
        let patient = Session::new("p@x.com", Role::Patient);
        let assigned = Session::new("d@x.com", Role::Doctor);
        let other = Session::new("e@x.com", Role::Doctor);

        let id = clinic
            .book_appointment(Some(&patient), booking(doctor_id))
            .await
            .unwrap()
            .to_string();

        let view = clinic
            .view_appointment_as_doctor(Some(&assigned), &id)
            .await
            .unwrap();
        assert_eq!(view.patient.email, "p@x.com");

        assert!(matches!(
            clinic.view_appointment_as_doctor(Some(&other), &id).await,
            Err(ClinicError::AccessDenied)
        ));
        assert!(matches!(
            clinic
                .submit_diagnosis(Some(&other), &id, DiagnosisForm::default())
                .await,
            Err(ClinicError::AccessDenied)
        ));
    }

    #[tokio::test]
    async fn test_any_doctor_may_view_without_ownership() {
        let (clinic, _, doctor_id) = seeded().await;
        clinic.signup(signup_form("doctor", "e@x.com")).await.unwrap();
        let patient = Session::new("p@x.com", Role::Patient);
        let other = Session::new("e@x.com", Role::Doctor);

        let id = clinic
            .book_appointment(Some(&patient), booking(doctor_id))
            .await
            .unwrap()
            .to_string();

        assert!(clinic.view_appointment_as_doctor(Some(&other), &id).await.is_ok());
    }

    #[tokio::test]
    async fn test_profiles_and_forgot_password() {
        let (clinic, _, _) = seeded().await;
        let doctor = Session::new("d@x.com", Role::Doctor);

        let profile = clinic.doctor_profile(Some(&doctor)).await.unwrap();
        assert_eq!(profile.profile.specialization(), Some("General"));
        assert!(clinic.patient_profile(Some(&doctor)).await.is_err());

        let known = clinic
            .forgot_password(ForgotPasswordForm {
                email: Some("d@x.com".to_string()),
            })
            .await;
        let unknown = clinic
            .forgot_password(ForgotPasswordForm {
                email: Some("nobody@x.com".to_string()),
            })
            .await;
        assert_eq!(known, unknown);
        assert!(known.simulated);
    }
}
