use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MechanicProfile::Table)
                    .if_not_exists()
                    .col(pk_auto(MechanicProfile::Id))
                    .col(string_len(MechanicProfile::DisplayName, 100).not_null())
                    .col(json(MechanicProfile::Specializations).not_null())
                    .col(boolean(MechanicProfile::IsVerified).not_null().default(false))
                    .col(boolean(MechanicProfile::IsAvailable).not_null().default(true))
                    .col(double_null(MechanicProfile::TravelRadiusKm))
                    .col(double_null(MechanicProfile::Latitude))
                    .col(double_null(MechanicProfile::Longitude))
                    .col(text_null(MechanicProfile::Address))
                    .col(timestamp_with_time_zone_null(MechanicProfile::LocationUpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_mechanic_profile_coordinates")
                    .table(MechanicProfile::Table)
                    .col(MechanicProfile::Latitude)
                    .col(MechanicProfile::Longitude)
                    .to_owned(),
            )
            .await?;

        // Seed mechanics around Manabí, Ecuador
        let insert = Query::insert()
            .into_table(MechanicProfile::Table)
            .columns([
                MechanicProfile::DisplayName,
                MechanicProfile::Specializations,
                MechanicProfile::IsVerified,
                MechanicProfile::TravelRadiusKm,
                MechanicProfile::Latitude,
                MechanicProfile::Longitude,
                MechanicProfile::Address,
                MechanicProfile::LocationUpdatedAt,
            ])
            .values_panic([
                "Taller Manta".into(),
                Expr::cust(r#"'["engine", "brakes"]'::json"#),
                true.into(),
                (15.0).into(),
                (-0.9536).into(),
                (-80.7381).into(),
                "Manta, Manabí, Ecuador".into(),
                Expr::current_timestamp().into(),
            ])
            .values_panic([
                "Mecánica Portoviejo".into(),
                Expr::cust(r#"'["electrical", "air_conditioning"]'::json"#),
                true.into(),
                (20.0).into(),
                (-1.0582).into(),
                (-80.7081).into(),
                "Portoviejo, Manabí, Ecuador".into(),
                Expr::current_timestamp().into(),
            ])
            .values_panic([
                "Servicio Chone".into(),
                Expr::cust(r#"'["tires", "brakes"]'::json"#),
                false.into(),
                (8.0).into(),
                (-1.3928).into(),
                (-80.4564).into(),
                "Chone, Manabí, Ecuador".into(),
                Expr::current_timestamp().into(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MechanicProfile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MechanicProfile {
    Table,
    Id,
    DisplayName,
    Specializations,
    IsVerified,
    IsAvailable,
    TravelRadiusKm,
    Latitude,
    Longitude,
    Address,
    LocationUpdatedAt,
}
