//! Order-item join pipeline
//!
//! Produces the denormalized view of one order: every order item joined to
//! its food, its order and the order's table, grouped per
//! `(order_id, table_id, table_number)` with the payment total of each group.
//!
//! The stages run in process over data fetched in bulk:
//!
//! 1. **filter**: order items whose `order_id` matches
//! 2. **join food**: by `food_id`
//! 3. **join order**: by `order_id`
//! 4. **join table**: by the order's `table_id`
//! 5. **project**: one [`OrderRow`] per item
//! 6. **group**: one [`OrderGroup`] per composite key
//!
//! Joins are outer joins. An item whose food, order or table is missing is
//! kept, with the fields that would come from the missing record left `null`.
//! When a key matches several records the first stored one wins.
//!
//! Any store failure aborts the whole invocation; partial results are never
//! returned.

use super::model::OrderItem;
use crate::core::error::ServiceResult;
use crate::core::money::sum_currency;
use crate::entities::food::Food;
use crate::entities::order::Order;
use crate::entities::table::Table;
use crate::storage::{Filter, Repository};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One order item joined with its food, order and table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRow {
    /// Food price; the value summed into `payment_due`
    pub amount: Option<f64>,
    pub food_name: Option<String>,
    pub food_image: Option<String>,
    pub table_number: Option<i64>,
    pub table_id: Option<String>,
    pub order_id: Option<String>,
    pub price: Option<f64>,
    pub quantity: i64,
}

/// Aggregate of the rows sharing one `(order_id, table_id, table_number)` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderGroup {
    /// Sum of `amount` over `order_items`, rounded to two decimals
    pub payment_due: f64,
    /// Number of rows in the group
    pub total_count: u64,
    pub table_number: Option<i64>,
    pub order_items: Vec<OrderRow>,
}

type GroupKey = (Option<String>, Option<String>, Option<i64>);

/// Run the pipeline for one order
///
/// An order without items yields an empty sequence.
pub async fn items_by_order(
    repository: &Repository,
    order_id: &str,
) -> ServiceResult<Vec<OrderGroup>> {
    let items = repository
        .list::<OrderItem>(&Filter::by("order_id", order_id))
        .await?;
    if items.is_empty() {
        tracing::debug!(order_id, "no order items for order");
        return Ok(Vec::new());
    }

    let food_ids: HashSet<&str> = items.iter().map(|i| i.food_id.as_str()).collect();
    let foods = repository
        .list::<Food>(&Filter::all().any_of("food_id", food_ids))
        .await?;

    let orders = repository
        .list::<Order>(&Filter::by("order_id", order_id))
        .await?;

    let table_ids: HashSet<&str> = orders.iter().filter_map(|o| o.table_id.as_deref()).collect();
    let tables = if table_ids.is_empty() {
        Vec::new()
    } else {
        repository
            .list::<Table>(&Filter::all().any_of("table_id", table_ids))
            .await?
    };

    let rows = join_rows(&items, &foods, &orders, &tables);
    let groups = group_rows(rows)?;

    tracing::debug!(
        order_id,
        items = items.len(),
        groups = groups.len(),
        "order items joined"
    );
    Ok(groups)
}

/// Stages 2 to 5: outer-join every item and project it to a row
pub fn join_rows(
    items: &[OrderItem],
    foods: &[Food],
    orders: &[Order],
    tables: &[Table],
) -> Vec<OrderRow> {
    let foods = first_by_key(foods, |f| f.food_id.as_str());
    let orders = first_by_key(orders, |o| o.order_id.as_str());
    let tables = first_by_key(tables, |t| t.table_id.as_str());

    items
        .iter()
        .map(|item| {
            let food = foods.get(item.food_id.as_str()).copied();
            let order = orders.get(item.order_id.as_str()).copied();
            let table = order
                .and_then(|o| o.table_id.as_deref())
                .and_then(|id| tables.get(id).copied());

            OrderRow {
                amount: food.map(|f| f.price),
                food_name: food.map(|f| f.name.clone()),
                food_image: food.map(|f| f.food_image.clone()),
                table_number: table.map(|t| t.table_number),
                table_id: table.map(|t| t.table_id.clone()),
                order_id: order.map(|o| o.order_id.clone()),
                price: food.map(|f| f.price),
                quantity: item.quantity,
            }
        })
        .collect()
}

/// Stage 6: group rows by `(order_id, table_id, table_number)`
///
/// Groups appear in the order their first row appears; rows keep their
/// input order inside a group. Rows without an amount add nothing to
/// `payment_due`. Fails if a group's total cannot be computed exactly.
pub fn group_rows(rows: Vec<OrderRow>) -> ServiceResult<Vec<OrderGroup>> {
    let mut groups: IndexMap<GroupKey, Vec<OrderRow>> = IndexMap::new();
    for row in rows {
        let key = (row.order_id.clone(), row.table_id.clone(), row.table_number);
        groups.entry(key).or_default().push(row);
    }

    groups
        .into_iter()
        .map(|((_, _, table_number), rows)| {
            Ok(OrderGroup {
                payment_due: sum_currency(rows.iter().filter_map(|r| r.amount))?,
                total_count: rows.len() as u64,
                table_number,
                order_items: rows,
            })
        })
        .collect()
}

fn first_by_key<'a, T>(records: &'a [T], key: impl Fn(&'a T) -> &'a str) -> HashMap<&'a str, &'a T> {
    let mut map = HashMap::with_capacity(records.len());
    for record in records {
        map.entry(key(record)).or_insert(record);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::now;

    fn food(name: &str, price: f64) -> Food {
        Food::new(name.to_string(), price, format!("{}.png", name), "m1".to_string())
    }

    fn item(order: &Order, food: &Food, quantity: i64) -> OrderItem {
        OrderItem::new(order.order_id.clone(), food.food_id.clone(), quantity, food.price)
    }

    #[test]
    fn test_three_items_two_foods_one_group() {
        let table = Table::new(4, 7);
        let order = Order::new(Some(table.table_id.clone()), now());
        let soup = food("soup", 10.0);
        let bread = food("bread", 5.5);
        let items = vec![
            item(&order, &soup, 1),
            item(&order, &bread, 2),
            item(&order, &soup, 1),
        ];

        let groups = group_rows(join_rows(
            &items,
            &[soup.clone(), bread.clone()],
            &[order.clone()],
            &[table.clone()],
        ))
        .unwrap();

        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        assert_eq!(group.table_number, Some(7));
        assert_eq!(group.total_count, 3);
        assert_eq!(group.payment_due, 25.5);

        let first = &group.order_items[0];
        assert_eq!(first.food_name.as_deref(), Some("soup"));
        assert_eq!(first.food_image.as_deref(), Some("soup.png"));
        assert_eq!(first.amount, Some(10.0));
        assert_eq!(first.price, Some(10.0));
        assert_eq!(first.table_id.as_deref(), Some(table.table_id.as_str()));
        assert_eq!(first.order_id.as_deref(), Some(order.order_id.as_str()));
        assert_eq!(group.order_items[1].quantity, 2);
    }

    #[test]
    fn test_missing_food_is_outer_joined() {
        let order = Order::new(None, now());
        let soup = food("soup", 10.0);
        let ghost = food("ghost", 99.0);
        let items = vec![item(&order, &soup, 1), item(&order, &ghost, 1)];

        let rows = join_rows(&items, &[soup], &[order.clone()], &[]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].amount, None);
        assert_eq!(rows[1].food_name, None);
        assert_eq!(rows[1].table_number, None);
        assert_eq!(rows[1].order_id.as_deref(), Some(order.order_id.as_str()));

        let groups = group_rows(rows).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].payment_due, 10.0);
        assert_eq!(groups[0].total_count, 2);
        assert_eq!(groups[0].table_number, None);
    }

    #[test]
    fn test_missing_order_leaves_order_fields_null() {
        let orphan_parent = Order::new(None, now());
        let soup = food("soup", 3.0);
        let rows = join_rows(&[item(&orphan_parent, &soup, 1)], &[soup], &[], &[]);

        assert_eq!(rows[0].order_id, None);
        assert_eq!(rows[0].table_id, None);
        assert_eq!(rows[0].amount, Some(3.0));
    }

    #[test]
    fn test_first_matching_record_wins() {
        let order = Order::new(None, now());
        let soup = food("soup", 10.0);
        let mut duplicate = soup.clone();
        duplicate.name = "soup v2".to_string();
        duplicate.price = 12.0;

        let rows = join_rows(&[item(&order, &soup, 1)], &[soup, duplicate], &[order], &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].food_name.as_deref(), Some("soup"));
    }

    #[test]
    fn test_groups_split_by_key_in_first_seen_order() {
        let row = |order: &str, table: Option<&str>, number: Option<i64>, amount: f64| OrderRow {
            amount: Some(amount),
            food_name: None,
            food_image: None,
            table_number: number,
            table_id: table.map(String::from),
            order_id: Some(order.to_string()),
            price: Some(amount),
            quantity: 1,
        };

        let groups = group_rows(vec![
            row("o1", Some("t2"), Some(2), 1.1),
            row("o1", Some("t1"), Some(1), 2.2),
            row("o1", Some("t2"), Some(2), 3.3),
        ])
        .unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].table_number, Some(2));
        assert_eq!(groups[0].total_count, 2);
        assert_eq!(groups[0].payment_due, 4.4);
        assert_eq!(groups[1].table_number, Some(1));
        assert_eq!(groups[1].payment_due, 2.2);
    }

    #[test]
    fn test_unsummable_total_fails_the_group() {
        let order = Order::new(None, now());
        let pricey = food("caviar", 5.0e28);
        let items = vec![item(&order, &pricey, 1), item(&order, &pricey, 1)];

        let err = group_rows(join_rows(&items, &[pricey], &[order], &[])).unwrap_err();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_no_rows_no_groups() {
        assert!(group_rows(Vec::new()).unwrap().is_empty());
    }
}
