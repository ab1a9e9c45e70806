#![allow(dead_code)]

use campus_config::SecurityConfig;
use campus_core::{
    Admission, AdmissionCourse, AdmissionService, Batch, Branch, Course, Document, Enquiry,
    Institute, Payment, PaymentCourse, PaymentService, RecordStatus, Role, Section,
    ServiceOffering, User,
};
use campus_repository::{EntityRepository, InMemoryRepository};
use campus_security::{PasswordHasher, TokenProvider};
use campus_service::{MemoryCacheStore, Repositories, ServiceRegistry};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

/// In-memory application with typed handles on the repositories.
pub struct Harness {
    pub users: Arc<InMemoryRepository<User>>,
    pub institutes: Arc<InMemoryRepository<Institute>>,
    pub branches: Arc<InMemoryRepository<Branch>>,
    pub courses: Arc<InMemoryRepository<Course>>,
    pub batches: Arc<InMemoryRepository<Batch>>,
    pub offerings: Arc<InMemoryRepository<ServiceOffering>>,
    pub admissions: Arc<InMemoryRepository<Admission>>,
    pub admission_courses: Arc<InMemoryRepository<AdmissionCourse>>,
    pub admission_services: Arc<InMemoryRepository<AdmissionService>>,
    pub payments: Arc<InMemoryRepository<Payment>>,
    pub payment_courses: Arc<InMemoryRepository<PaymentCourse>>,
    pub payment_services: Arc<InMemoryRepository<PaymentService>>,
    pub cache: Arc<MemoryCacheStore>,
    pub repos: Repositories,
    pub services: ServiceRegistry,
    pub hasher: Arc<PasswordHasher>,
}

impl Harness {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryRepository::new());
        let institutes = Arc::new(InMemoryRepository::new());
        let branches = Arc::new(InMemoryRepository::new());
        let courses = Arc::new(InMemoryRepository::new());
        let batches = Arc::new(InMemoryRepository::new());
        let offerings = Arc::new(InMemoryRepository::new());
        let admissions = Arc::new(InMemoryRepository::new());
        let admission_courses = Arc::new(InMemoryRepository::new());
        let admission_services = Arc::new(InMemoryRepository::new());
        let payments = Arc::new(InMemoryRepository::new());
        let payment_courses = Arc::new(InMemoryRepository::new());
        let payment_services = Arc::new(InMemoryRepository::new());

        let repos = Repositories {
            users: users.clone(),
            institutes: institutes.clone(),
            branches: branches.clone(),
            sections: Arc::new(InMemoryRepository::<Section>::new()),
            courses: courses.clone(),
            batches: batches.clone(),
            services: offerings.clone(),
            enquiries: Arc::new(InMemoryRepository::<Enquiry>::new()),
            admissions: admissions.clone(),
            admission_courses: admission_courses.clone(),
            admission_services: admission_services.clone(),
            documents: Arc::new(InMemoryRepository::<Document>::new()),
            payments: payments.clone(),
            payment_courses: payment_courses.clone(),
            payment_services: payment_services.clone(),
        };

        let cache = Arc::new(MemoryCacheStore::default());
        let hasher = Arc::new(PasswordHasher::fast());
        let tokens = Arc::new(TokenProvider::new(&SecurityConfig {
            jwt_secret: "harness-secret".to_string(),
            ..Default::default()
        }));
        let services = ServiceRegistry::new(&repos, cache.clone(), Arc::clone(&hasher), tokens);

        Self {
            users,
            institutes,
            branches,
            courses,
            batches,
            offerings,
            admissions,
            admission_courses,
            admission_services,
            payments,
            payment_courses,
            payment_services,
            cache,
            repos,
            services,
            hasher,
        }
    }

    /// Stores a user directly, bypassing services and cache.
    pub async fn seed_user(&self, role: Role, status: RecordStatus, branch_id: Option<i64>) -> User {
        let now = Utc::now();
        let email = format!("user{}@example.com", self.users.len() + 1);
        let user = User {
            reg_id: 0,
            user_name: "Seeded".to_string(),
            contact: "9000000000".to_string(),
            email,
            password: self.hasher.hash("Secret@123").unwrap(),
            branch_id,
            role,
            status,
            added_by: None,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await.unwrap()
    }

    pub async fn seed_branch(&self, name: &str) -> Branch {
        self.seed_branch_with_status(name, RecordStatus::Active).await
    }

    pub async fn seed_branch_with_status(&self, name: &str, status: RecordStatus) -> Branch {
        let now = Utc::now();
        let branch = Branch {
            branch_id: 0,
            branch_name: name.to_string(),
            branch_code: name.to_uppercase(),
            institute_name: Some("Campus Institute".to_string()),
            email: None,
            phone: None,
            alternative_phone: None,
            address: None,
            district: None,
            state: None,
            pincode: None,
            established_date: None,
            status,
            added_by: None,
            created_at: now,
            updated_at: now,
        };
        self.branches.create(&branch).await.unwrap()
    }

    pub async fn seed_course(&self, branch_id: i64) -> Course {
        let now = Utc::now();
        let course = Course {
            course_id: 0,
            course_name: "Full Stack".to_string(),
            course_code: Some("FS".to_string()),
            duration: Some("6 months".to_string()),
            fees: Some("30000".to_string()),
            subject: None,
            description: None,
            certificate_offered: None,
            status: RecordStatus::Active,
            branch_id,
            added_by: None,
            created_at: now,
            updated_at: now,
        };
        self.courses.create(&course).await.unwrap()
    }

    pub async fn seed_admission(&self, branch_id: i64) -> Admission {
        let now = Utc::now();
        let admission = Admission {
            admission_id: 0,
            full_name: "Ravi Kumar".to_string(),
            gender: None,
            dob: None,
            email: None,
            contact: "9111111111".to_string(),
            address: None,
            pincode: None,
            college_name: None,
            department: None,
            admission_date: None,
            reference: None,
            status: RecordStatus::Active,
            branch_id,
            added_by: None,
            created_at: now,
            updated_at: now,
        };
        self.admissions.create(&admission).await.unwrap()
    }

    pub async fn seed_admission_course(
        &self,
        admission_id: i64,
        course_id: i64,
        branch_id: i64,
    ) -> AdmissionCourse {
        let now = Utc::now();
        let enrolment = AdmissionCourse {
            adm_course_id: 0,
            course_id,
            batch_id: None,
            admission_id,
            branch_id,
            status: RecordStatus::Active,
            added_by: None,
            created_at: now,
            updated_at: now,
        };
        self.admission_courses.create(&enrolment).await.unwrap()
    }

    pub async fn seed_admission_service(
        &self,
        admission_id: i64,
        branch_id: i64,
    ) -> AdmissionService {
        let now = Utc::now();
        let offering = self
            .offerings
            .create(&ServiceOffering {
                service_id: 0,
                service_name: "Placement".to_string(),
                service_details: None,
                status: RecordStatus::Active,
                branch_id,
                added_by: None,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        let enrolment = AdmissionService {
            adm_service_id: 0,
            service_id: offering.service_id,
            admission_id,
            branch_id,
            status: RecordStatus::Active,
            added_by: None,
            created_at: now,
            updated_at: now,
        };
        self.admission_services.create(&enrolment).await.unwrap()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
