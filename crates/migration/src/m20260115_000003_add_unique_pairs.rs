use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // A student is enrolled in a batch at most once
        manager
            .create_index(
                Index::create()
                    .name("uq_enrollments_batch_student")
                    .table(Enrollments::Table)
                    .col(Enrollments::BatchId)
                    .col(Enrollments::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // A teacher is allotted to a batch at most once
        manager
            .create_index(
                Index::create()
                    .name("uq_batch_teachers_batch_teacher")
                    .table(BatchTeachers::Table)
                    .col(BatchTeachers::BatchId)
                    .col(BatchTeachers::TeacherId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_user_auth_providers_user_provider")
                    .table(UserAuthProviders::Table)
                    .col(UserAuthProviders::UserId)
                    .col(UserAuthProviders::Provider)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("uq_user_auth_providers_user_provider")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("uq_batch_teachers_batch_teacher")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(Index::drop().name("uq_enrollments_batch_student").to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Enrollments {
    Table,
    BatchId,
    StudentId,
}

#[derive(Iden)]
enum BatchTeachers {
    Table,
    BatchId,
    TeacherId,
}

#[derive(Iden)]
enum UserAuthProviders {
    Table,
    UserId,
    Provider,
}
