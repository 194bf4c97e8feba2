//! Request DTOs and their validation into service inputs.
//!
//! Validation failures are returned as plain messages; handlers answer them
//! with 400.

use rust_decimal::Decimal;
use serde::Deserialize;

use orderdesk_core::{CustomerId, OrderId, ProductId};
use orderdesk_customers::CreateCustomer;
use orderdesk_orders::{CreateOrder, FindOrder};
use orderdesk_products::{CreateProduct, ProductQuantity};

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
}

impl CreateCustomerRequest {
    pub fn validate(self) -> Result<CreateCustomer, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("name is required".to_string());
        }
        let email = self.email.trim();
        if !looks_like_email(email) {
            return Err("email must be a valid e-mail address".to_string());
        }
        Ok(CreateCustomer {
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderProductRequest {
    pub id: String,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub products: Vec<OrderProductRequest>,
}

impl CreateOrderRequest {
    pub fn validate(self) -> Result<CreateOrder, String> {
        let customer_id: CustomerId = self.customer_id.parse().map_err(|e| format!("{e}"))?;

        if self.products.is_empty() {
            return Err("products must not be empty".to_string());
        }

        let products = self
            .products
            .into_iter()
            .map(|p| {
                if p.quantity <= 0 {
                    return Err(format!("quantity for product {} must be positive", p.id));
                }
                let id: ProductId = p.id.parse().map_err(|e| format!("{e}"))?;
                Ok(ProductQuantity {
                    id,
                    quantity: p.quantity,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(CreateOrder {
            customer_id,
            products,
        })
    }
}

pub fn parse_find_order(id: &str) -> Result<FindOrder, String> {
    let id: OrderId = id.parse().map_err(|e| format!("{e}"))?;
    Ok(FindOrder { id })
}

/// Prices are stored as `NUMERIC(12, 2)`: two decimals, ten integer digits.
const PRICE_SCALE: u32 = 2;
const PRICE_LIMIT: i64 = 10_000_000_000;

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: Decimal,
    pub quantity: i64,
}

impl CreateProductRequest {
    pub fn validate(self) -> Result<CreateProduct, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("name is required".to_string());
        }
        if self.price.is_sign_negative() {
            return Err("price must not be negative".to_string());
        }
        if self.price.normalize().scale() > PRICE_SCALE {
            return Err(format!("price must have at most {PRICE_SCALE} decimal places"));
        }
        if self.price >= Decimal::from(PRICE_LIMIT) {
            return Err(format!("price must be below {PRICE_LIMIT}"));
        }
        if self.quantity < 0 {
            return Err("quantity must not be negative".to_string());
        }
        Ok(CreateProduct {
            name: name.to_string(),
            price: self.price,
            quantity: self.quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_request_trims_and_checks_email() {
        let ok = CreateCustomerRequest {
            name: "  Ada ".to_string(),
            email: "ada@example.com".to_string(),
        }
        .validate()
        .unwrap();
        assert_eq!(ok.name, "Ada");

        for bad in ["", "ada", "ada@", "@example.com", "ada@example", "a da@example.com"] {
            let res = CreateCustomerRequest {
                name: "Ada".to_string(),
                email: bad.to_string(),
            }
            .validate();
            assert!(res.is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn product_request_price_fits_the_stored_precision() {
        let request = |price: Decimal| CreateProductRequest {
            name: "Mouse".to_string(),
            price,
            quantity: 1,
        };

        for ok in [Decimal::new(599, 2), Decimal::new(5990, 3), Decimal::new(999_999_999_999, 2)] {
            let product = request(ok).validate().unwrap();
            assert_eq!(product.price, ok);
        }

        let err = request(Decimal::new(5999, 3)).validate().unwrap_err();
        assert_eq!(err, "price must have at most 2 decimal places");

        let err = request(Decimal::from(PRICE_LIMIT)).validate().unwrap_err();
        assert_eq!(err, "price must be below 10000000000");
    }

    #[test]
    fn order_request_rejects_non_positive_quantity() {
        let err = CreateOrderRequest {
            customer_id: CustomerId::new().to_string(),
            products: vec![OrderProductRequest {
                id: ProductId::new().to_string(),
                quantity: 0,
            }],
        }
        .validate()
        .unwrap_err();

        assert!(err.contains("must be positive"));
    }

    #[test]
    fn order_request_rejects_malformed_ids() {
        let err = CreateOrderRequest {
            customer_id: "nope".to_string(),
            products: vec![],
        }
        .validate()
        .unwrap_err();

        assert!(err.starts_with("invalid identifier: CustomerId"));
    }

    #[test]
    fn order_request_keeps_entry_order() {
        let a = ProductId::new();
        let b = ProductId::new();

        let order = CreateOrderRequest {
            customer_id: CustomerId::new().to_string(),
            products: vec![
                OrderProductRequest { id: b.to_string(), quantity: 1 },
                OrderProductRequest { id: a.to_string(), quantity: 2 },
            ],
        }
        .validate()
        .unwrap();

        assert_eq!(
            order.products,
            vec![
                ProductQuantity { id: b, quantity: 1 },
                ProductQuantity { id: a, quantity: 2 },
            ]
        );
    }
}
