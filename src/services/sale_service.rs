use crate::entities::{customer_entity as customers, sale_entity as sales};
use crate::error::{AppError, AppResult};
use crate::models::{SaleRecordResponse, SaleResponse};
use crate::services::TicketService;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use std::time::Duration;

const ALREADY_SOLD: &str = "Ticket already sold";

/// 锁竞争时整笔售票事务的最大尝试次数
const SELL_ATTEMPTS: u32 = 5;

#[derive(Clone)]
pub struct SaleService {
    pool: DatabaseConnection,
}

impl SaleService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 售票 (Sell)
    ///
    /// 逻辑 (单个事务):
    /// 1. 读取彩票 (行锁)，不存在 -> NotFound
    /// 2. 彩票必须为 AVAILABLE，否则 -> Conflict (快速失败)
    /// 3. 读取客户，不存在 -> NotFound
    /// 4. 先写销售记录，价格取彩票当前价格；sales.ticket_id 唯一索引是并发下的最终裁决，
    ///    插入失败即视为已售出，事务回滚，彩票保持 AVAILABLE
    /// 5. 销售记录写入后再将彩票置为 SOLD 并关联客户
    /// 6. 提交并返回销售结果
    ///
    /// 事务因锁竞争失败 (数据库忙 / 序列化冲突) 时回滚并重试；重试后彩票通常已被售出，
    /// 返回 Conflict。重试耗尽同样返回 Conflict，不暴露为数据库错误。
    pub async fn sell(&self, ticket_id: i64, customer_id: i64) -> AppResult<SaleResponse> {
        let mut attempt = 1;
        loop {
            match self.sell_once(ticket_id, customer_id).await {
                Err(e) if e.is_lock_contention() => {
                    if attempt >= SELL_ATTEMPTS {
                        log::warn!(
                            "Sale rejected: ticket {ticket_id} still contended after {attempt} attempts: {e}"
                        );
                        return Err(AppError::Conflict(
                            "Ticket is being sold concurrently".to_string(),
                        ));
                    }
                    log::debug!("Sale of ticket {ticket_id} hit lock contention, retrying: {e}");
                    tokio::time::sleep(Duration::from_millis(20 * u64::from(attempt))).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn sell_once(&self, ticket_id: i64, customer_id: i64) -> AppResult<SaleResponse> {
        let txn = self.pool.begin().await?;

        let ticket = TicketService::lock_ticket(&txn, ticket_id).await?;
        if !ticket.is_available() {
            log::warn!("Sale rejected: ticket {ticket_id} is already sold");
            return Err(AppError::Conflict(ALREADY_SOLD.to_string()));
        }

        let customer = customers::Entity::find_by_id(customer_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer {customer_id} not found")))?;

        let sold_at = Utc::now();
        let sale = sales::ActiveModel {
            ticket_id: Set(ticket.id),
            customer_id: Set(customer.id),
            sold_at: Set(sold_at),
            price: Set(ticket.price),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            log::warn!("Sale rejected: ledger write for ticket {ticket_id} failed: {e}");
            AppError::on_constraint_violation(e, ALREADY_SOLD)
        })?;

        TicketService::mark_sold(&txn, ticket.id, customer.id).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::on_constraint_violation(e, ALREADY_SOLD))?;

        log::info!(
            "Ticket sold: sale={} ticket={} number={} customer={} price={}",
            sale.id,
            ticket.id,
            ticket.number,
            customer.id,
            sale.price
        );

        Ok(SaleResponse {
            sale_id: sale.id,
            ticket_id: ticket.id,
            ticket_number: ticket.number,
            customer_id: customer.id,
            customer_name: customer.name,
            sold_at,
            price: sale.price,
        })
    }

    /// 查询彩票的销售记录 (对账用)
    pub async fn get_by_ticket(&self, ticket_id: i64) -> AppResult<SaleRecordResponse> {
        sales::Entity::find()
            .filter(sales::Column::TicketId.eq(ticket_id))
            .one(&self.pool)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("No sale recorded for ticket {ticket_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TicketState;
    use crate::models::{CustomerResponse, TicketResponse};
    use crate::services::{CustomerService, DrawService};
    use crate::testing::{customer_request, draw_request, setup_db, setup_file_db};
    use rust_decimal_macros::dec;
    use futures_util::future::join_all;
    use sea_orm::PaginatorTrait;

    struct Fixture {
        pool: DatabaseConnection,
        sales: SaleService,
        tickets: TicketService,
        customers: CustomerService,
        ticket: TicketResponse,
        customer: CustomerResponse,
    }

    async fn fixture() -> Fixture {
        fixture_on(setup_db().await).await
    }

    async fn fixture_on(pool: DatabaseConnection) -> Fixture {
        let draws = DrawService::new(pool.clone());
        let tickets = TicketService::new(pool.clone());
        let customers = CustomerService::new(pool.clone());

        let draw = draws.create_draw(draw_request("Sorteo")).await.unwrap();
        let ticket = tickets
            .generate_tickets(draw.id, 1, dec!(10000))
            .await
            .unwrap()
            .remove(0);
        let customer = customers
            .register(customer_request("Jane Doe", "jane@example.com"))
            .await
            .unwrap();

        Fixture {
            sales: SaleService::new(pool.clone()),
            pool,
            tickets,
            customers,
            ticket,
            customer,
        }
    }

    async fn sale_count(pool: &DatabaseConnection, ticket_id: i64) -> u64 {
        sales::Entity::find()
            .filter(sales::Column::TicketId.eq(ticket_id))
            .count(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_sell_snapshot() {
        let f = fixture().await;
        let before = Utc::now();

        let sale = f.sales.sell(f.ticket.id, f.customer.id).await.unwrap();

        assert_eq!(sale.ticket_id, f.ticket.id);
        assert_eq!(sale.ticket_number, "0001");
        assert_eq!(sale.customer_id, f.customer.id);
        assert_eq!(sale.customer_name, "Jane Doe");
        assert_eq!(sale.price, dec!(10000));
        assert!(sale.sold_at >= before);

        let ticket = f.tickets.get_ticket(f.ticket.id).await.unwrap();
        assert_eq!(ticket.state, TicketState::Sold);
        assert_eq!(ticket.customer_id, Some(f.customer.id));

        let record = f.sales.get_by_ticket(f.ticket.id).await.unwrap();
        assert_eq!(record.id, sale.sale_id);
        assert_eq!(record.price, dec!(10000));

        // 第二次售卖同一张彩票，无论客户是谁都冲突
        let other = f
            .customers
            .register(customer_request("John Roe", "john@example.com"))
            .await
            .unwrap();
        let err = f.sales.sell(f.ticket.id, other.id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(sale_count(&f.pool, f.ticket.id).await, 1);
    }

    #[tokio::test]
    async fn test_sell_missing_ticket() {
        let f = fixture().await;
        let err = f.sales.sell(9999, f.customer.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_sell_missing_customer_leaves_ticket_available() {
        let f = fixture().await;

        let err = f.sales.sell(f.ticket.id, 9999).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let ticket = f.tickets.get_ticket(f.ticket.id).await.unwrap();
        assert_eq!(ticket.state, TicketState::Available);
        assert_eq!(ticket.customer_id, None);
        assert_eq!(sale_count(&f.pool, f.ticket.id).await, 0);
    }

    #[tokio::test]
    async fn test_sold_ticket_is_checked_before_customer() {
        let f = fixture().await;
        f.sales.sell(f.ticket.id, f.customer.id).await.unwrap();

        let err = f.sales.sell(f.ticket.id, 9999).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_ledger_write_failure_keeps_ticket_available() {
        let f = fixture().await;
        let other = f
            .customers
            .register(customer_request("John Roe", "john@example.com"))
            .await
            .unwrap();

        // 模拟并发售票: 另一笔销售记录已写入，但彩票状态尚未翻转
        sales::ActiveModel {
            ticket_id: Set(f.ticket.id),
            customer_id: Set(other.id),
            sold_at: Set(Utc::now()),
            price: Set(f.ticket.price),
            ..Default::default()
        }
        .insert(&f.pool)
        .await
        .unwrap();

        let err = f.sales.sell(f.ticket.id, f.customer.id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let ticket = f.tickets.get_ticket(f.ticket.id).await.unwrap();
        assert_eq!(ticket.state, TicketState::Available);
        assert_eq!(ticket.customer_id, None);

        assert_eq!(sale_count(&f.pool, f.ticket.id).await, 1);
        let record = f.sales.get_by_ticket(f.ticket.id).await.unwrap();
        assert_eq!(record.customer_id, other.id);
    }

    /// 多连接文件库: 各笔售票事务可同时通过 AVAILABLE 检查，
    /// 由写锁 / sales.ticket_id 唯一索引裁决，失败方必须是 Conflict 而不是数据库错误
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_sells_only_one_succeeds() {
        let (pool, _dir) = setup_file_db(8).await;
        let f = fixture_on(pool).await;

        let mut buyers = Vec::new();
        for i in 0..8 {
            let c = f
                .customers
                .register(customer_request(
                    &format!("Buyer {i}"),
                    &format!("buyer{i}@example.com"),
                ))
                .await
                .unwrap();
            buyers.push(c.id);
        }

        let handles = buyers.into_iter().map(|customer_id| {
            let sales = f.sales.clone();
            let ticket_id = f.ticket.id;
            tokio::spawn(async move { sales.sell(ticket_id, customer_id).await })
        });

        let results: Vec<AppResult<SaleResponse>> = join_all(handles)
            .await
            .into_iter()
            .map(|joined| joined.expect("sell task panicked"))
            .collect();

        let succeeded: Vec<&SaleResponse> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(succeeded.len(), 1);
        assert!(
            results
                .iter()
                .filter_map(|r| r.as_ref().err())
                .all(|e| matches!(e, AppError::Conflict(_)))
        );

        let ticket = f.tickets.get_ticket(f.ticket.id).await.unwrap();
        assert_eq!(ticket.state, TicketState::Sold);
        assert_eq!(ticket.customer_id, Some(succeeded[0].customer_id));
        assert_eq!(sale_count(&f.pool, f.ticket.id).await, 1);
    }

    #[tokio::test]
    async fn test_sale_price_is_a_snapshot() {
        let f = fixture().await;
        f.sales.sell(f.ticket.id, f.customer.id).await.unwrap();

        // 售出后改价不影响历史销售记录
        crate::entities::ticket_entity::Entity::update_many()
            .set(crate::entities::ticket_entity::ActiveModel {
                price: Set(dec!(25000)),
                ..Default::default()
            })
            .filter(crate::entities::ticket_entity::Column::Id.eq(f.ticket.id))
            .exec(&f.pool)
            .await
            .unwrap();

        let record = f.sales.get_by_ticket(f.ticket.id).await.unwrap();
        assert_eq!(record.price, dec!(10000));
    }

    #[tokio::test]
    async fn test_history_after_sale() {
        let f = fixture().await;
        f.sales.sell(f.ticket.id, f.customer.id).await.unwrap();

        let history = f
            .customers
            .history_by_email("jane@example.com")
            .await
            .unwrap();
        assert_eq!(history.id, f.customer.id);
        assert_eq!(history.tickets.len(), 1);

        let summary = &history.tickets[0];
        assert_eq!(summary.id, f.ticket.id);
        assert_eq!(summary.number, "0001");
        assert_eq!(summary.price, dec!(10000));
        assert_eq!(summary.state, "SOLD");
        assert_eq!(summary.draw_id, f.ticket.draw_id);
        assert_eq!(summary.draw_name, "Sorteo");
    }

    #[tokio::test]
    async fn test_customer_with_sales_cannot_be_deleted() {
        let f = fixture().await;
        f.sales.sell(f.ticket.id, f.customer.id).await.unwrap();

        let err = f.customers.delete(f.customer.id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(f.customers.get(f.customer.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_draw_with_sold_tickets_cannot_be_deleted() {
        let f = fixture().await;
        f.sales.sell(f.ticket.id, f.customer.id).await.unwrap();

        let draws = DrawService::new(f.pool.clone());
        let err = draws.delete_draw(f.ticket.draw_id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(f.tickets.list_by_draw(f.ticket.draw_id).await.unwrap().len(), 1);
    }
}
