//! Write gates, payments and authentication through the service layer.

mod common;

use campus_core::{CrmError, RecordStatus, Role};
use campus_repository::EntityRepository;
use campus_service::{
    BranchDraft, BranchPatch, CacheStore, CourseDraft, DocumentDraft, LedgerEntry, ListScope,
    LoginRequest, PaymentCourseDraft, PaymentDraft, PaymentServiceDraft, SuperAdminRequest,
    UserDraft, UserPatch,
};
use common::{date, Harness};

fn course_draft(branch_id: i64, name: &str) -> CourseDraft {
    CourseDraft {
        course_name: name.to_string(),
        course_code: None,
        duration: Some("3 months".to_string()),
        fees: Some("12000".to_string()),
        subject: None,
        description: None,
        certificate_offered: None,
        branch_id,
    }
}

fn branch_draft(name: &str) -> BranchDraft {
    BranchDraft {
        branch_name: name.to_string(),
        branch_code: name.to_uppercase(),
        institute_name: None,
        email: None,
        phone: None,
        alternative_phone: None,
        address: None,
        district: None,
        state: None,
        pincode: None,
        established_date: None,
    }
}

fn user_draft(email: &str, branch_id: i64) -> UserDraft {
    UserDraft {
        user_name: "Anita".to_string(),
        contact: "9876543210".to_string(),
        email: email.to_string(),
        password: "Secret@123".to_string(),
        confirm_password: "Secret@123".to_string(),
        branch_id: Some(branch_id),
        role: Role::User,
    }
}

#[tokio::test]
async fn test_inactive_actor_cannot_write() {
    let harness = Harness::new();
    let branch = harness.seed_branch("Main").await;
    let actor = harness
        .seed_user(Role::Admin, RecordStatus::Inactive, Some(branch.branch_id))
        .await;
    harness.courses.reset_counts();

    let err = harness
        .services
        .courses
        .create(actor.reg_id, course_draft(branch.branch_id, "Java"))
        .await
        .unwrap_err();

    assert!(matches!(err, CrmError::Unauthorized(_)));
    assert_eq!(harness.courses.write_count(), 0);
    assert!(harness.courses.is_empty());
}

#[tokio::test]
async fn test_unknown_actor_cannot_write() {
    let harness = Harness::new();
    let branch = harness.seed_branch("Main").await;

    let err = harness
        .services
        .courses
        .create(404, course_draft(branch.branch_id, "Java"))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 401);
    assert!(harness.courses.is_empty());
}

#[tokio::test]
async fn test_branch_writes_need_super_admin() {
    let harness = Harness::new();
    let admin = harness.seed_user(Role::Admin, RecordStatus::Active, None).await;
    let root = harness.seed_user(Role::SuperAdmin, RecordStatus::Active, None).await;

    let err = harness
        .services
        .branches
        .create(admin.reg_id, branch_draft("North"))
        .await
        .unwrap_err();
    assert!(matches!(err, CrmError::Unauthorized(_)));
    assert!(harness.branches.is_empty());

    let created = harness
        .services
        .branches
        .create(root.reg_id, branch_draft("North"))
        .await
        .unwrap();
    assert_eq!(created.added_by, Some(root.reg_id));

    let renamed = harness
        .services
        .branches
        .update(
            root.reg_id,
            created.branch_id,
            BranchPatch {
                branch_name: Some("North Campus".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.branch_name, "North Campus");
    assert_eq!(renamed.branch_code, "NORTH");
}

#[tokio::test]
async fn test_inactive_parent_rejects_create_but_not_update() {
    let harness = Harness::new();
    let actor = harness.seed_user(Role::Admin, RecordStatus::Active, None).await;
    let open = harness.seed_branch("Open").await;
    let closed = harness
        .seed_branch_with_status("Closed", RecordStatus::Inactive)
        .await;

    let err = harness
        .services
        .courses
        .create(actor.reg_id, course_draft(closed.branch_id, "Tally"))
        .await
        .unwrap_err();
    assert!(matches!(err, CrmError::NotFound { resource: "Branch", .. }));
    assert!(harness.courses.is_empty());

    let course = harness
        .services
        .courses
        .create(actor.reg_id, course_draft(open.branch_id, "Tally"))
        .await
        .unwrap();

    harness
        .services
        .branches
        .accessor()
        .change_status(open.branch_id, RecordStatus::Inactive)
        .await
        .unwrap();

    let updated = harness
        .services
        .courses
        .update(
            actor.reg_id,
            course.course_id,
            campus_service::CoursePatch {
                fees: Some("15000".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.fees.as_deref(), Some("15000"));
}

#[tokio::test]
async fn test_deleted_parent_rejects_update() {
    let harness = Harness::new();
    let actor = harness.seed_user(Role::Admin, RecordStatus::Active, None).await;
    let first = harness.seed_branch("First").await;
    let second = harness.seed_branch("Second").await;
    let course = harness
        .services
        .courses
        .create(actor.reg_id, course_draft(first.branch_id, "Excel"))
        .await
        .unwrap();
    harness
        .services
        .branches
        .accessor()
        .soft_delete(second.branch_id)
        .await
        .unwrap();

    let err = harness
        .services
        .courses
        .update(
            actor.reg_id,
            course.course_id,
            campus_service::CoursePatch {
                branch_id: Some(second.branch_id),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 404);
    assert_eq!(
        harness.courses.stored(course.course_id).unwrap().branch_id,
        first.branch_id
    );
}

#[tokio::test]
async fn test_status_change_and_delete_through_service() {
    let harness = Harness::new();
    let actor = harness.seed_user(Role::Admin, RecordStatus::Active, None).await;
    let branch = harness.seed_branch("Main").await;
    let course = harness
        .services
        .courses
        .create(actor.reg_id, course_draft(branch.branch_id, "SQL"))
        .await
        .unwrap();
    let scope = ListScope::by("branch_id", branch.branch_id);

    let paused = harness
        .services
        .courses
        .change_status(actor.reg_id, course.course_id, RecordStatus::Inactive)
        .await
        .unwrap();
    assert_eq!(paused.status, RecordStatus::Inactive);
    let listed = harness.services.courses.list(scope).await.unwrap();
    assert_eq!(listed[0].status, RecordStatus::Inactive);

    let err = harness
        .services
        .courses
        .change_status(actor.reg_id, course.course_id, RecordStatus::Deleted)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");

    harness
        .services
        .courses
        .delete(actor.reg_id, course.course_id)
        .await
        .unwrap();
    assert!(harness.services.courses.list(scope).await.unwrap().is_empty());

    let err = harness
        .services
        .courses
        .change_status(actor.reg_id, course.course_id, RecordStatus::Active)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
    let err = harness
        .services
        .courses
        .delete(actor.reg_id, course.course_id)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_payment_with_two_targets_is_conflict() {
    let harness = Harness::new();
    let actor = harness.seed_user(Role::Admin, RecordStatus::Active, None).await;
    let branch = harness.seed_branch("Main").await;
    let course = harness.seed_course(branch.branch_id).await;
    let admission = harness.seed_admission(branch.branch_id).await;
    let enrolment = harness
        .seed_admission_course(admission.admission_id, course.course_id, branch.branch_id)
        .await;
    let service = harness
        .seed_admission_service(admission.admission_id, branch.branch_id)
        .await;

    let mut draft = PaymentDraft {
        admission_id: Some(admission.admission_id),
        adm_course_id: Some(enrolment.adm_course_id),
        adm_service_id: Some(service.adm_service_id),
        payment_date: date(2024, 6, 1),
        amount_paid: "2500.00".to_string(),
        payment_mode: "upi".to_string(),
        remark: None,
        received_by: "Front desk".to_string(),
        branch_id: Some(branch.branch_id),
    };

    let err = harness
        .services
        .payments
        .create(actor.reg_id, draft.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, CrmError::Conflict(_)));
    assert!(harness.payments.is_empty());

    draft.adm_course_id = None;
    draft.adm_service_id = None;
    let err = harness
        .services
        .payments
        .create(actor.reg_id, draft.clone())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 409);

    draft.adm_service_id = Some(service.adm_service_id);
    let created = harness
        .services
        .payments
        .create(actor.reg_id, draft)
        .await
        .unwrap();
    assert_eq!(created.adm_service_id, Some(service.adm_service_id));
    assert_eq!(created.adm_course_id, None);
}

#[tokio::test]
async fn test_invalid_amount_is_rejected_before_any_read() {
    let harness = Harness::new();
    let actor = harness.seed_user(Role::Admin, RecordStatus::Active, None).await;
    harness.users.reset_counts();

    let err = harness
        .services
        .payments
        .create(
            actor.reg_id,
            PaymentDraft {
                admission_id: Some(1),
                adm_course_id: Some(1),
                adm_service_id: None,
                payment_date: date(2024, 6, 1),
                amount_paid: "12.345".to_string(),
                payment_mode: "cash".to_string(),
                remark: None,
                received_by: "Desk".to_string(),
                branch_id: Some(1),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "VALIDATION_ERROR");
    assert_eq!(harness.users.read_count(), 0);
}

#[tokio::test]
async fn test_user_email_must_be_unique() {
    let harness = Harness::new();
    let branch = harness.seed_branch("Main").await;
    let actor = harness
        .seed_user(Role::Admin, RecordStatus::Active, Some(branch.branch_id))
        .await;

    let created = harness
        .services
        .users
        .create(actor.reg_id, user_draft("anita@example.com", branch.branch_id))
        .await
        .unwrap();
    assert_ne!(created.password, "Secret@123");
    assert!(harness.hasher.verify("Secret@123", &created.password).unwrap());

    let err = harness
        .services
        .users
        .create(actor.reg_id, user_draft("anita@example.com", branch.branch_id))
        .await
        .unwrap_err();
    assert!(matches!(err, CrmError::Conflict(_)));

    harness
        .services
        .users
        .delete(actor.reg_id, created.reg_id)
        .await
        .unwrap();
    let err = harness
        .services
        .users
        .create(actor.reg_id, user_draft("anita@example.com", branch.branch_id))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 409);
}

#[tokio::test]
async fn test_password_confirmation_must_match() {
    let harness = Harness::new();
    let branch = harness.seed_branch("Main").await;
    let actor = harness.seed_user(Role::Admin, RecordStatus::Active, None).await;
    let mut draft = user_draft("vijay@example.com", branch.branch_id);
    draft.confirm_password = "Secret@124".to_string();
    let before = harness.users.len();

    let err = harness
        .services
        .users
        .create(actor.reg_id, draft)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
    assert_eq!(harness.users.len(), before);

    let err = harness
        .services
        .users
        .update(
            actor.reg_id,
            actor.reg_id,
            UserPatch {
                password: Some("Changed@1".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_moving_user_between_branches_refreshes_both_lists() {
    let harness = Harness::new();
    let first = harness.seed_branch("First").await;
    let second = harness.seed_branch("Second").await;
    let actor = harness.seed_user(Role::Admin, RecordStatus::Active, None).await;
    let user = harness
        .services
        .users
        .create(actor.reg_id, user_draft("mover@example.com", first.branch_id))
        .await
        .unwrap();

    let by_first = ListScope::by("branch_id", first.branch_id);
    let by_second = ListScope::by("branch_id", second.branch_id);
    assert_eq!(harness.services.users.list(by_first).await.unwrap().len(), 1);
    assert!(harness.services.users.list(by_second).await.unwrap().is_empty());

    harness
        .services
        .users
        .update(
            actor.reg_id,
            user.reg_id,
            UserPatch {
                branch_id: Some(second.branch_id),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(harness.services.users.list(by_first).await.unwrap().is_empty());
    let moved = harness.services.users.list(by_second).await.unwrap();
    assert_eq!(moved.len(), 1);
    assert_eq!(moved[0].reg_id, user.reg_id);
}

#[tokio::test]
async fn test_ledger_merges_course_and_service_payments() {
    let harness = Harness::new();
    let actor = harness.seed_user(Role::Admin, RecordStatus::Active, None).await;
    let branch = harness.seed_branch("Main").await;
    let course = harness.seed_course(branch.branch_id).await;
    let admission = harness.seed_admission(branch.branch_id).await;
    let enrolment = harness
        .seed_admission_course(admission.admission_id, course.course_id, branch.branch_id)
        .await;
    let service = harness
        .seed_admission_service(admission.admission_id, branch.branch_id)
        .await;

    let course_payment = |day: u32, amount: &str| PaymentCourseDraft {
        admission_id: admission.admission_id,
        adm_course_id: enrolment.adm_course_id,
        section_id: None,
        payment_date: date(2024, 7, day),
        amount_paid: amount.to_string(),
        payment_mode: "cash".to_string(),
        remark: None,
        received_by: "Desk".to_string(),
        branch_id: branch.branch_id,
    };

    harness
        .services
        .payment_courses
        .create(actor.reg_id, course_payment(10, "5000"))
        .await
        .unwrap();
    harness
        .services
        .payment_services
        .create(
            actor.reg_id,
            PaymentServiceDraft {
                admission_id: admission.admission_id,
                adm_service_id: service.adm_service_id,
                section_id: None,
                payment_date: date(2024, 7, 5),
                amount_paid: "750.50".to_string(),
                payment_mode: "upi".to_string(),
                remark: None,
                received_by: "Desk".to_string(),
                branch_id: branch.branch_id,
            },
        )
        .await
        .unwrap();
    harness
        .services
        .payment_courses
        .create(actor.reg_id, course_payment(5, "2000"))
        .await
        .unwrap();

    let ledger = harness
        .services
        .ledger
        .by_admission(admission.admission_id)
        .await
        .unwrap();
    let amounts: Vec<&str> = ledger.iter().map(LedgerEntry::amount_paid).collect();
    assert_eq!(amounts, vec!["2000", "750.50", "5000"]);
    assert!(matches!(ledger[0], LedgerEntry::Course(_)));
    assert!(matches!(ledger[1], LedgerEntry::Service(_)));

    let by_branch = harness
        .services
        .ledger
        .by_branch(branch.branch_id)
        .await
        .unwrap();
    assert_eq!(by_branch, ledger);

    assert!(harness.services.ledger.by_admission(999).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_admission_detail_shows_new_document() {
    let harness = Harness::new();
    let actor = harness.seed_user(Role::Admin, RecordStatus::Active, None).await;
    let branch = harness.seed_branch("Main").await;
    let course = harness.seed_course(branch.branch_id).await;
    let admission = harness.seed_admission(branch.branch_id).await;
    harness
        .seed_admission_course(admission.admission_id, course.course_id, branch.branch_id)
        .await;
    let details = &harness.services.admission_details;

    let before = details.get(admission.admission_id).await.unwrap();
    assert_eq!(before.admission, admission);
    assert!(before.documents.is_empty());
    assert_eq!(before.courses.len(), 1);
    assert!(before.services.is_empty());
    let documents_key = format!("document_admission_{}", admission.admission_id);
    assert!(harness.cache.has(&documents_key).await.unwrap());

    harness
        .services
        .documents
        .create(
            actor.reg_id,
            DocumentDraft {
                document_name: "Aadhaar".to_string(),
                file: "/uploads/document/abc.pdf".to_string(),
                admission_id: admission.admission_id,
                branch_id: branch.branch_id,
            },
        )
        .await
        .unwrap();
    assert!(!harness.cache.has(&documents_key).await.unwrap());

    let after = details.get(admission.admission_id).await.unwrap();
    assert_eq!(after.documents.len(), 1);
    assert_eq!(after.documents[0].document_name, "Aadhaar");
    assert_eq!(after.courses, before.courses);

    let by_branch = details.by_branch(branch.branch_id).await.unwrap();
    assert_eq!(by_branch, vec![after]);

    harness
        .services
        .admissions
        .delete(actor.reg_id, admission.admission_id)
        .await
        .unwrap();
    let err = details.get(admission.admission_id).await.unwrap_err();
    assert!(matches!(err, CrmError::NotFound { .. }));
    assert!(details.by_branch(branch.branch_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_issues_token_for_active_user() {
    let harness = Harness::new();
    let user = harness.seed_user(Role::Admin, RecordStatus::Active, None).await;

    let outcome = harness
        .services
        .auth
        .login(LoginRequest {
            email: user.email.clone(),
            password: "Secret@123".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(outcome.user.reg_id, user.reg_id);

    let claims = harness
        .services
        .auth
        .verify_session(&outcome.token.token)
        .unwrap();
    assert_eq!(claims.reg_id(), user.reg_id);

    let current = harness.services.auth.current_user(&claims).await.unwrap();
    assert_eq!(current.email, user.email);
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let harness = Harness::new();
    let active = harness.seed_user(Role::User, RecordStatus::Active, None).await;
    let inactive = harness.seed_user(Role::User, RecordStatus::Inactive, None).await;

    let wrong_password = harness
        .services
        .auth
        .login(LoginRequest {
            email: active.email.clone(),
            password: "Wrong@123".to_string(),
        })
        .await
        .unwrap_err();
    let not_active = harness
        .services
        .auth
        .login(LoginRequest {
            email: inactive.email.clone(),
            password: "Secret@123".to_string(),
        })
        .await
        .unwrap_err();
    let unknown = harness
        .services
        .auth
        .login(LoginRequest {
            email: "nobody@example.com".to_string(),
            password: "Secret@123".to_string(),
        })
        .await
        .unwrap_err();

    for err in [&wrong_password, &not_active, &unknown] {
        assert_eq!(err.status_code(), 401);
    }
    assert_eq!(wrong_password.public_message(), unknown.public_message());
    assert_eq!(not_active.public_message(), unknown.public_message());
}

#[tokio::test]
async fn test_deleted_user_session_is_unauthorized() {
    let harness = Harness::new();
    let admin = harness.seed_user(Role::Admin, RecordStatus::Active, None).await;
    let user = harness.seed_user(Role::User, RecordStatus::Active, None).await;
    let outcome = harness
        .services
        .auth
        .login(LoginRequest {
            email: user.email.clone(),
            password: "Secret@123".to_string(),
        })
        .await
        .unwrap();
    let claims = harness
        .services
        .auth
        .verify_session(&outcome.token.token)
        .unwrap();

    harness
        .services
        .users
        .delete(admin.reg_id, user.reg_id)
        .await
        .unwrap();

    let err = harness.services.auth.current_user(&claims).await.unwrap_err();
    assert!(matches!(err, CrmError::Unauthorized(_)));
}

#[tokio::test]
async fn test_super_admin_bootstrap_only_once() {
    let harness = Harness::new();
    let request = |email: &str| SuperAdminRequest {
        user_name: "Root".to_string(),
        contact: "9000012345".to_string(),
        email: email.to_string(),
        password: "Secret@123".to_string(),
        confirm_password: "Secret@123".to_string(),
    };

    let admin = harness
        .services
        .auth
        .create_super_admin(request("root@example.com"))
        .await
        .unwrap();
    assert_eq!(admin.role, Role::SuperAdmin);
    assert_eq!(admin.status, RecordStatus::Active);

    let err = harness
        .services
        .auth
        .create_super_admin(request("other@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, CrmError::Conflict(_)));
    assert_eq!(harness.users.len(), 1);
}

#[tokio::test]
async fn test_branding_uses_first_live_institute() {
    let harness = Harness::new();
    let branch = harness.seed_branch("Main").await;

    let err = harness
        .services
        .branding
        .for_branch(branch.branch_id)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);

    let now = chrono::Utc::now();
    harness
        .institutes
        .create(&campus_core::Institute {
            inst_id: 0,
            inst_name: "Campus Institute".to_string(),
            reg_no: None,
            gst_no: None,
            email: "office@example.com".to_string(),
            phone_no: "9000000000".to_string(),
            alt_phone: None,
            address: "MG Road".to_string(),
            city: None,
            state: None,
            pin_no: None,
            logo: Some("institute/logo.png".to_string()),
            estd_year: None,
            director: None,
            status: RecordStatus::Active,
            added_by: None,
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap();
    harness.cache.flush_all().await.unwrap();

    let branding = harness
        .services
        .branding
        .for_branch(branch.branch_id)
        .await
        .unwrap();
    assert_eq!(branding.institute_name, "Campus Institute");
    assert_eq!(branding.branch_name, "Main");
    assert_eq!(branding.logo.as_deref(), Some("institute/logo.png"));
}
