use std::collections::HashMap;

use crate::entities::{customer_entity as customers, draw_entity as draws, sale_entity as sales};
use crate::error::{AppError, AppResult};
use crate::models::{CustomerHistoryResponse, CustomerRequest, CustomerResponse, TicketSummary};
use crate::services::TicketService;
use crate::utils::{require_non_blank, validate_email};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

const DUPLICATE_EMAIL: &str = "A customer with this email already exists";

#[derive(Clone)]
pub struct CustomerService {
    pool: DatabaseConnection,
}

impl CustomerService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 注册客户 (email 唯一，大小写敏感)
    pub async fn register(&self, request: CustomerRequest) -> AppResult<CustomerResponse> {
        validate(&request)?;

        if self.find_model_by_email(&request.email).await?.is_some() {
            return Err(AppError::Conflict(DUPLICATE_EMAIL.to_string()));
        }

        let model = customers::ActiveModel {
            name: Set(request.name),
            email: Set(request.email),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| AppError::on_constraint_violation(e, DUPLICATE_EMAIL))?;

        log::info!("Customer registered: id={}", model.id);
        Ok(model.into())
    }

    pub async fn list(&self) -> AppResult<Vec<CustomerResponse>> {
        let list = customers::Entity::find()
            .order_by_asc(customers::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, customer_id: i64) -> AppResult<CustomerResponse> {
        Ok(self.find_model(customer_id).await?.into())
    }

    /// 更新姓名与邮箱；新邮箱不能被其他客户占用，保持原邮箱不算冲突
    pub async fn update(
        &self,
        customer_id: i64,
        request: CustomerRequest,
    ) -> AppResult<CustomerResponse> {
        validate(&request)?;

        let current = self.find_model(customer_id).await?;

        if current.email != request.email
            && let Some(other) = self.find_model_by_email(&request.email).await?
            && other.id != customer_id
        {
            return Err(AppError::Conflict(
                "Email is already registered by another customer".to_string(),
            ));
        }

        let mut model = current.into_active_model();
        model.name = Set(request.name);
        model.email = Set(request.email);
        let updated = model
            .update(&self.pool)
            .await
            .map_err(|e| AppError::on_constraint_violation(e, DUPLICATE_EMAIL))?;

        Ok(updated.into())
    }

    /// 删除客户；存在销售记录时拒绝 (销售记录不可删除，也不能指向不存在的客户)
    pub async fn delete(&self, customer_id: i64) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        customers::Entity::find_by_id(customer_id)
            .one(&txn)
            .await?
            .ok_or_else(|| customer_not_found(customer_id))?;

        let sale_count = sales::Entity::find()
            .filter(sales::Column::CustomerId.eq(customer_id))
            .count(&txn)
            .await?;
        if sale_count > 0 {
            return Err(AppError::Conflict(format!(
                "Customer has {sale_count} sales and cannot be deleted"
            )));
        }

        customers::Entity::delete_by_id(customer_id)
            .exec(&txn)
            .await
            .map_err(|e| AppError::on_constraint_violation(e, "Customer is referenced by sales"))?;

        txn.commit().await?;
        log::info!("Customer deleted: id={customer_id}");
        Ok(())
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<CustomerResponse> {
        self.find_model_by_email(email)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))
    }

    /// 客户购票历史:
    /// 1. 按邮箱定位客户
    /// 2. 读取当前关联该客户的所有彩票
    /// 3. 一次性读取涉及的期次，拼装期次名称
    pub async fn history_by_email(&self, email: &str) -> AppResult<CustomerHistoryResponse> {
        let customer = self
            .find_model_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

        let owned = TicketService::find_by_customer(&self.pool, customer.id).await?;

        let mut draw_ids: Vec<i64> = owned.iter().map(|t| t.draw_id).collect();
        draw_ids.sort_unstable();
        draw_ids.dedup();

        let draw_names: HashMap<i64, String> = if draw_ids.is_empty() {
            HashMap::new()
        } else {
            draws::Entity::find()
                .filter(draws::Column::Id.is_in(draw_ids))
                .all(&self.pool)
                .await?
                .into_iter()
                .map(|d| (d.id, d.name))
                .collect()
        };

        let tickets = owned
            .into_iter()
            .map(|t| -> AppResult<TicketSummary> {
                let draw_name = draw_names.get(&t.draw_id).cloned().ok_or_else(|| {
                    AppError::InternalError(format!(
                        "Draw {} of ticket {} is missing",
                        t.draw_id, t.id
                    ))
                })?;
                Ok(TicketSummary {
                    id: t.id,
                    number: t.number,
                    price: t.price,
                    state: t.state.to_string(),
                    draw_id: t.draw_id,
                    draw_name,
                })
            })
            .collect::<AppResult<Vec<TicketSummary>>>()?;

        Ok(CustomerHistoryResponse {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            tickets,
        })
    }

    async fn find_model(&self, customer_id: i64) -> AppResult<customers::Model> {
        customers::Entity::find_by_id(customer_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| customer_not_found(customer_id))
    }

    async fn find_model_by_email(&self, email: &str) -> AppResult<Option<customers::Model>> {
        Ok(customers::Entity::find()
            .filter(customers::Column::Email.eq(email))
            .one(&self.pool)
            .await?)
    }
}

fn validate(request: &CustomerRequest) -> AppResult<()> {
    require_non_blank(&request.name, "name")?;
    validate_email(&request.email)
}

fn customer_not_found(customer_id: i64) -> AppError {
    AppError::NotFound(format!("Customer {customer_id} not found"))
}
