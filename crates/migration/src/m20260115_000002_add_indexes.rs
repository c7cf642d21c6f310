use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Foreign key lookups for batch membership and content listings
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_student_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contents_batch_id")
                    .table(Contents::Table)
                    .col(Contents::BatchId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comments_content_id")
                    .table(Comments::Table)
                    .col(Comments::ContentId)
                    .to_owned(),
            )
            .await?;

        // Inbox listing is newest first per recipient
        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_recipient_created")
                    .table(Notifications::Table)
                    .col(Notifications::RecipientId)
                    .col(Notifications::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_batch_start")
                    .table(Schedules::Table)
                    .col(Schedules::BatchId)
                    .col(Schedules::StartTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payments_payer_id")
                    .table(Payments::Table)
                    .col(Payments::PayerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_timetable_slots_teacher_id")
                    .table(TimetableSlots::Table)
                    .col(TimetableSlots::TeacherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_timetable_slots_class_id")
                    .table(TimetableSlots::Table)
                    .col(TimetableSlots::ClassId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        manager
            .drop_index(Index::drop().name("idx_timetable_slots_class_id").to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_timetable_slots_teacher_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(Index::drop().name("idx_payments_payer_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_schedules_batch_start").to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_notifications_recipient_created")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(Index::drop().name("idx_comments_content_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_contents_batch_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_enrollments_student_id").to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Enrollments {
    Table,
    StudentId,
}

#[derive(Iden)]
enum Contents {
    Table,
    BatchId,
}

#[derive(Iden)]
enum Comments {
    Table,
    ContentId,
}

#[derive(Iden)]
enum Notifications {
    Table,
    RecipientId,
    CreatedAt,
}

#[derive(Iden)]
enum Schedules {
    Table,
    BatchId,
    StartTime,
}

#[derive(Iden)]
enum Payments {
    Table,
    PayerId,
}

#[derive(Iden)]
enum TimetableSlots {
    Table,
    TeacherId,
    ClassId,
}
