use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create roles table
        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(string(Roles::Id).primary_key())
                    .col(string(Roles::Name).unique_key())
                    .col(string(Roles::NormalizedName).unique_key())
                    .col(string_null(Roles::ConcurrencyStamp))
                    .to_owned(),
            )
            .await?;

        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(string(Users::Id).primary_key())
                    .col(string(Users::Email))
                    .col(string(Users::NormalizedEmail))
                    .col(string(Users::UserName).unique_key())
                    .col(string(Users::NormalizedUserName).unique_key())
                    .col(string_null(Users::PasswordHash))
                    .col(boolean(Users::LockoutEnabled))
                    .col(boolean(Users::EmailConfirmed))
                    .col(string(Users::DisplayName))
                    .col(date(Users::BirthDate))
                    .col(string_null(Users::SecurityStamp))
                    .col(string_null(Users::ConcurrencyStamp))
                    .col(string_null(Users::PhoneNumber))
                    .col(boolean(Users::PhoneNumberConfirmed).default(false))
                    .col(boolean(Users::TwoFactorEnabled).default(false))
                    .col(timestamp_with_time_zone_null(Users::LockoutEnd))
                    .col(integer(Users::AccessFailedCount).default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_normalized_email")
                    .table(Users::Table)
                    .col(Users::NormalizedEmail)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Create user_roles table (join table)
        manager
            .create_table(
                Table::create()
                    .table(UserRoles::Table)
                    .if_not_exists()
                    .col(string(UserRoles::UserId))
                    .col(string(UserRoles::RoleId))
                    .primary_key(
                        Index::create()
                            .name("pk_user_roles")
                            .col(UserRoles::UserId)
                            .col(UserRoles::RoleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_roles_user")
                            .from(UserRoles::Table, UserRoles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_roles_role")
                            .from(UserRoles::Table, UserRoles::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order to avoid foreign key constraints
        manager
            .drop_table(Table::drop().table(UserRoles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Id,
    Name,
    NormalizedName,
    ConcurrencyStamp,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    NormalizedEmail,
    UserName,
    NormalizedUserName,
    PasswordHash,
    LockoutEnabled,
    EmailConfirmed,
    DisplayName,
    BirthDate,
    SecurityStamp,
    ConcurrencyStamp,
    PhoneNumber,
    PhoneNumberConfirmed,
    TwoFactorEnabled,
    LockoutEnd,
    AccessFailedCount,
}

#[derive(DeriveIden)]
enum UserRoles {
    Table,
    UserId,
    RoleId,
}
