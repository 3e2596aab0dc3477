use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(ServiceStatus::Enum)
                    .values([
                        ServiceStatus::Pending,
                        ServiceStatus::Accepted,
                        ServiceStatus::InProgress,
                        ServiceStatus::Completed,
                        ServiceStatus::Cancelled,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ServiceRequest::Table)
                    .if_not_exists()
                    .col(pk_auto(ServiceRequest::Id))
                    .col(string_len(ServiceRequest::Title, 200).not_null())
                    .col(text_null(ServiceRequest::Description))
                    .col(
                        ColumnDef::new(ServiceRequest::Status)
                            .custom(ServiceStatus::Enum)
                            .not_null()
                            .default(Expr::cust("'pending'::service_status")),
                    )
                    .col(string_len(ServiceRequest::UrgencyLevel, 20).not_null().default("medium"))
                    .col(boolean(ServiceRequest::IsEmergency).not_null().default(false))
                    .col(text_null(ServiceRequest::LocationAddress))
                    .col(double_null(ServiceRequest::LocationLatitude))
                    .col(double_null(ServiceRequest::LocationLongitude))
                    .col(
                        timestamp_with_time_zone(ServiceRequest::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_service_request_coordinates")
                    .table(ServiceRequest::Table)
                    .col(ServiceRequest::LocationLatitude)
                    .col(ServiceRequest::LocationLongitude)
                    .to_owned(),
            )
            .await?;

        // Seed open requests across Manabí; the last one has no coordinates yet
        let seeds: [(&str, &str, Option<(f64, f64)>); 6] = [
            ("Brake pads squeaking", "Manta", Some((-0.9536, -80.7381))),
            ("Battery will not hold charge", "Portoviejo", Some((-1.0582, -80.7081))),
            ("Engine overheating", "Santa Ana", Some((-1.0367, -80.4581))),
            ("Flat tire on the highway", "Jipijapa", Some((-1.2794, -80.8161))),
            ("A/C not cooling", "Bahía de Caráquez", Some((-0.7931, -80.2675))),
            ("Strange noise when turning", "Calceta", None),
        ];

        let mut insert = Query::insert();
        insert.into_table(ServiceRequest::Table).columns([
            ServiceRequest::Title,
            ServiceRequest::LocationAddress,
            ServiceRequest::LocationLatitude,
            ServiceRequest::LocationLongitude,
        ]);
        for (title, place, coords) in seeds {
            insert.values_panic([
                title.into(),
                format!("{}, Manabí, Ecuador", place).into(),
                coords.map(|(lat, _)| lat).into(),
                coords.map(|(_, lng)| lng).into(),
            ]);
        }

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServiceRequest::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ServiceStatus::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ServiceRequest {
    Table,
    Id,
    Title,
    Description,
    Status,
    UrgencyLevel,
    IsEmergency,
    LocationAddress,
    LocationLatitude,
    LocationLongitude,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum ServiceStatus {
    #[sea_orm(iden = "service_status")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "accepted")]
    Accepted,
    #[sea_orm(iden = "in_progress")]
    InProgress,
    #[sea_orm(iden = "completed")]
    Completed,
    #[sea_orm(iden = "cancelled")]
    Cancelled,
}
