use chrono::NaiveDate;
use sqlx::PgPool;

use identity_auth::CredentialStore;
use identity_db::{PgStudentsRepository, RepositoryError, StudentsRepository};
use identity_models::Student;

fn student(id: &str, cpf: &str, email: &str) -> Student {
    Student {
        id: id.to_string(),
        name: "John Doe".to_string(),
        secret: "$2b$12$C6UzMDM.H6dfI/f/IKcEeO5Vp0d9bWmjXxg1nJ/lLnwV/gBNRYNEy".to_string(),
        cpf: cpf.to_string(),
        email: email.to_string(),
        birth_date: NaiveDate::from_ymd_opt(1990, 10, 18).unwrap(),
    }
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_create_student_then_read_secret(pool: PgPool) {
    let repo = PgStudentsRepository::new(pool);
    let new = student("201210204310", "11111111030", "jdoe@ol.com");

    repo.create_student(&new).await.unwrap();

    let secret = repo.get_secret("201210204310").await.unwrap();
    assert_eq!(secret, Some(new.secret));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_student_id(pool: PgPool) {
    let repo = PgStudentsRepository::new(pool);

    repo.create_student(&student("201210204310", "11111111030", "jdoe@ol.com"))
        .await
        .unwrap();

    let err = repo
        .create_student(&student("201210204310", "52998224725", "other@ol.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::StudentAlreadyExists));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_unknown_student_has_no_secret(pool: PgPool) {
    let repo = PgStudentsRepository::new(pool);

    assert!(repo.get_secret("123456789").await.unwrap().is_none());
}
