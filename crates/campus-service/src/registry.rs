//! Explicit wiring of repositories and services.

use crate::cache::CacheStore;
use crate::services::{
    AdmissionDetails, AuthService, BrandingService, PaymentLedger, RecordService, UserService,
};
use crate::{ActorGate, CacheAside, ParentGate};
use campus_core::{
    Admission, AdmissionCourse, AdmissionService, Batch, Branch, Course, Document, Enquiry,
    Entity, Institute, Payment, PaymentCourse, PaymentService, Section, ServiceOffering, User,
};
use campus_repository::{DatabasePool, EntityRepository, InMemoryRepository, MySqlRepository};
use campus_security::{PasswordHasher, TokenProvider};
use std::sync::Arc;

/// One repository per record type.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn EntityRepository<User>>,
    pub institutes: Arc<dyn EntityRepository<Institute>>,
    pub branches: Arc<dyn EntityRepository<Branch>>,
    pub sections: Arc<dyn EntityRepository<Section>>,
    pub courses: Arc<dyn EntityRepository<Course>>,
    pub batches: Arc<dyn EntityRepository<Batch>>,
    pub services: Arc<dyn EntityRepository<ServiceOffering>>,
    pub enquiries: Arc<dyn EntityRepository<Enquiry>>,
    pub admissions: Arc<dyn EntityRepository<Admission>>,
    pub admission_courses: Arc<dyn EntityRepository<AdmissionCourse>>,
    pub admission_services: Arc<dyn EntityRepository<AdmissionService>>,
    pub documents: Arc<dyn EntityRepository<Document>>,
    pub payments: Arc<dyn EntityRepository<Payment>>,
    pub payment_courses: Arc<dyn EntityRepository<PaymentCourse>>,
    pub payment_services: Arc<dyn EntityRepository<PaymentService>>,
}

impl Repositories {
    /// MySQL-backed repositories sharing one pool.
    #[must_use]
    pub fn mysql(pool: &Arc<DatabasePool>) -> Self {
        Self {
            users: mysql_repo(pool),
            institutes: mysql_repo(pool),
            branches: mysql_repo(pool),
            sections: mysql_repo(pool),
            courses: mysql_repo(pool),
            batches: mysql_repo(pool),
            services: mysql_repo(pool),
            enquiries: mysql_repo(pool),
            admissions: mysql_repo(pool),
            admission_courses: mysql_repo(pool),
            admission_services: mysql_repo(pool),
            documents: mysql_repo(pool),
            payments: mysql_repo(pool),
            payment_courses: mysql_repo(pool),
            payment_services: mysql_repo(pool),
        }
    }

    /// Process-local repositories.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            users: memory_repo(),
            institutes: memory_repo(),
            branches: memory_repo(),
            sections: memory_repo(),
            courses: memory_repo(),
            batches: memory_repo(),
            services: memory_repo(),
            enquiries: memory_repo(),
            admissions: memory_repo(),
            admission_courses: memory_repo(),
            admission_services: memory_repo(),
            documents: memory_repo(),
            payments: memory_repo(),
            payment_courses: memory_repo(),
            payment_services: memory_repo(),
        }
    }
}

fn mysql_repo<E>(pool: &Arc<DatabasePool>) -> Arc<dyn EntityRepository<E>>
where
    E: Entity,
    MySqlRepository<E>: EntityRepository<E>,
{
    Arc::new(MySqlRepository::<E>::new(Arc::clone(pool)))
}

fn memory_repo<E: Entity>() -> Arc<dyn EntityRepository<E>> {
    Arc::new(InMemoryRepository::<E>::new())
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}

/// Every service of the application, built once at startup.
#[derive(Clone)]
pub struct ServiceRegistry {
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub institutes: Arc<RecordService<Institute>>,
    pub branches: Arc<RecordService<Branch>>,
    pub sections: Arc<RecordService<Section>>,
    pub courses: Arc<RecordService<Course>>,
    pub batches: Arc<RecordService<Batch>>,
    pub services: Arc<RecordService<ServiceOffering>>,
    pub enquiries: Arc<RecordService<Enquiry>>,
    pub admissions: Arc<RecordService<Admission>>,
    pub admission_courses: Arc<RecordService<AdmissionCourse>>,
    pub admission_services: Arc<RecordService<AdmissionService>>,
    pub documents: Arc<RecordService<Document>>,
    pub payments: Arc<RecordService<Payment>>,
    pub payment_courses: Arc<RecordService<PaymentCourse>>,
    pub payment_services: Arc<RecordService<PaymentService>>,
    pub ledger: Arc<PaymentLedger>,
    pub admission_details: Arc<AdmissionDetails>,
    pub branding: Arc<BrandingService>,
    pub cache: Arc<dyn CacheStore>,
}

impl ServiceRegistry {
    /// Wires every service against one cache store.
    #[must_use]
    pub fn new(
        repos: &Repositories,
        cache: Arc<dyn CacheStore>,
        hasher: Arc<PasswordHasher>,
        tokens: Arc<TokenProvider>,
    ) -> Self {
        let actors = ActorGate::new(Arc::clone(&repos.users));
        let parents = ParentGate::new(repos);

        macro_rules! record_service {
            ($repo:ident) => {
                Arc::new(RecordService::new(
                    CacheAside::new(Arc::clone(&repos.$repo), Arc::clone(&cache)),
                    actors.clone(),
                    parents.clone(),
                ))
            };
        }

        let payment_courses =
            CacheAside::new(Arc::clone(&repos.payment_courses), Arc::clone(&cache));
        let payment_services =
            CacheAside::new(Arc::clone(&repos.payment_services), Arc::clone(&cache));
        let institutes = CacheAside::new(Arc::clone(&repos.institutes), Arc::clone(&cache));
        let branches = CacheAside::new(Arc::clone(&repos.branches), Arc::clone(&cache));
        let users = CacheAside::new(Arc::clone(&repos.users), Arc::clone(&cache));
        let admission_details = AdmissionDetails::new(
            CacheAside::new(Arc::clone(&repos.admissions), Arc::clone(&cache)),
            CacheAside::new(Arc::clone(&repos.documents), Arc::clone(&cache)),
            CacheAside::new(Arc::clone(&repos.admission_courses), Arc::clone(&cache)),
            CacheAside::new(Arc::clone(&repos.admission_services), Arc::clone(&cache)),
        );

        Self {
            auth: Arc::new(AuthService::new(
                users.clone(),
                Arc::clone(&repos.users),
                Arc::clone(&hasher),
                tokens,
            )),
            users: Arc::new(UserService::new(
                users,
                Arc::clone(&repos.users),
                actors.clone(),
                parents.clone(),
                hasher,
            )),
            institutes: record_service!(institutes),
            branches: record_service!(branches),
            sections: record_service!(sections),
            courses: record_service!(courses),
            batches: record_service!(batches),
            services: record_service!(services),
            enquiries: record_service!(enquiries),
            admissions: record_service!(admissions),
            admission_courses: record_service!(admission_courses),
            admission_services: record_service!(admission_services),
            documents: record_service!(documents),
            payments: record_service!(payments),
            payment_courses: record_service!(payment_courses),
            payment_services: record_service!(payment_services),
            ledger: Arc::new(PaymentLedger::new(payment_courses, payment_services)),
            admission_details: Arc::new(admission_details),
            branding: Arc::new(BrandingService::new(institutes, branches)),
            cache,
        }
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("cache", &self.cache.stats())
            .finish_non_exhaustive()
    }
}
