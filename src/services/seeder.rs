use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;

use crate::auth::hash_password;
use crate::database::manager::DatabaseError;
use crate::database::repositories::{CategoryRepository, ProductRepository, UserRepository};

/// Seeder behavior is explicit construction-time state, not a global flag:
/// quiet mode suppresses per-batch log output for environments where seeding
/// noise is unwanted.
#[derive(Debug, Clone, Copy)]
pub struct SeederOptions {
    pub quiet: bool,
}

/// Populates empty tables with demo data. Every seed step is idempotent: it
/// checks for existing rows first and does nothing when any are present.
pub struct Seeder {
    pool: PgPool,
    options: SeederOptions,
}

const DEMO_PASSWORD: &str = "Password123!";

const CATEGORIES: &[(&str, &str)] = &[
    ("Electrónica y Tecnología", "Dispositivos electrónicos, smartphones, tablets y gadgets tecnológicos"),
    ("Ropa y Accesorios", "Prendas para hombres, mujeres y niños"),
    ("Hogar y Jardín", "Artículos para el hogar, decoración y jardinería"),
    ("Deportes y Fitness", "Equipamiento deportivo y accesorios para ejercicio"),
    ("Libros y Medios", "Libros físicos y digitales, revistas y medios impresos"),
    ("Juguetes y Juegos", "Juguetes educativos y de entretenimiento para todas las edades"),
    ("Alimentos y Bebidas", "Productos alimenticios frescos, enlatados y bebidas"),
    ("Belleza y Cuidado Personal", "Cosméticos, productos de belleza y cuidado personal"),
    ("Computadoras y Accesorios", "Laptops, PCs, periféricos y accesorios informáticos"),
    ("Música", "CDs, discos de vinilo y productos musicales"),
];

// (name, description, price cents, stock, category index)
const PRODUCTS: &[(&str, &str, i64, i32, usize)] = &[
    ("Smartphone Samsung Galaxy", "Smartphone con pantalla AMOLED de 6.7 pulgadas", 89999, 15, 0),
    ("iPhone 15 Pro", "Último modelo de Apple con chip A17 Pro", 129999, 10, 0),
    ("Audífonos Sony WH-1000XM5", "Audífonos con cancelación de ruido", 39999, 20, 0),
    ("Playera de Algodón Básica", "Playera 100% algodón, múltiples colores disponibles", 1999, 50, 1),
    ("Jeans Clásicos", "Jeans corte recto, tallas disponibles", 5999, 30, 1),
    ("Sofá de 3 Plazas", "Sofá cómodo con cojines removibles", 59999, 5, 2),
    ("Lámpara de Pie", "Lámpara LED con regulador de intensidad", 8999, 20, 2),
    ("Balón de Fútbol", "Balón oficial talla 5", 2999, 35, 3),
    ("Mancuernas Ajustables", "Par de mancuernas de 10kg", 7999, 20, 3),
    ("Laptop HP Pavilion", "Laptop de 15.6 pulgadas, Intel Core i7, 16GB RAM", 89999, 8, 8),
];

const USERS: &[(&str, &str)] = &[
    ("admin@catalog.local", "Admin"),
    ("category@catalog.local", "Category"),
    ("product@catalog.local", "Product"),
];

impl Seeder {
    pub fn new(pool: PgPool, options: SeederOptions) -> Self {
        Self { pool, options }
    }

    pub async fn seed_all(&self) -> Result<(), DatabaseError> {
        self.seed_users().await?;
        self.seed_categories().await?;
        self.seed_products().await?;
        Ok(())
    }

    async fn seed_users(&self) -> Result<(), DatabaseError> {
        let users = UserRepository::new(self.pool.clone());
        if users.count().await? > 0 {
            return Ok(());
        }

        for (email, role) in USERS {
            users.insert(email, &hash_password(DEMO_PASSWORD), role).await?;
        }

        if !self.options.quiet {
            info!("Seeded {} demo users", USERS.len());
        }
        Ok(())
    }

    async fn seed_categories(&self) -> Result<(), DatabaseError> {
        let categories = CategoryRepository::new(self.pool.clone());
        let (existing, _) = categories
            .get_paged(crate::search::PageParams::clamped(1, 1), None)
            .await?;
        if !existing.is_empty() {
            return Ok(());
        }

        for (name, description) in CATEGORIES {
            categories.insert(name, Some(*description)).await?;
        }

        if !self.options.quiet {
            info!("Seeded {} categories", CATEGORIES.len());
        }
        Ok(())
    }

    async fn seed_products(&self) -> Result<(), DatabaseError> {
        let categories = CategoryRepository::new(self.pool.clone());
        let products = ProductRepository::new(self.pool.clone());

        let (existing, _) = products
            .get_paged(crate::search::PageParams::clamped(1, 1), None)
            .await?;
        if !existing.is_empty() {
            return Ok(());
        }

        let (seeded_categories, _) = categories
            .get_paged(
                crate::search::PageParams::clamped(1, CATEGORIES.len() as i64),
                None,
            )
            .await?;
        if seeded_categories.is_empty() {
            return Ok(());
        }

        // Category order here is name-sorted, so resolve seed indexes by name
        let category_id = |index: usize| {
            let name = CATEGORIES[index].0;
            seeded_categories
                .iter()
                .find(|c| c.name == name)
                .map(|c| c.id)
        };

        for (name, description, cents, stock, index) in PRODUCTS {
            let Some(category) = category_id(*index) else {
                continue;
            };
            products
                .insert(name, Some(*description), Decimal::new(*cents, 2), *stock, category)
                .await?;
        }

        if !self.options.quiet {
            info!("Seeded {} products", PRODUCTS.len());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_data_references_valid_category_indexes() {
        for (name, _, _, _, index) in PRODUCTS {
            assert!(
                *index < CATEGORIES.len(),
                "product '{}' references missing category index {}",
                name,
                index
            );
        }
    }

    #[test]
    fn seed_prices_and_stock_are_non_negative() {
        for (_, _, cents, stock, _) in PRODUCTS {
            assert!(*cents >= 0);
            assert!(*stock >= 0);
        }
    }

    #[test]
    fn seed_names_are_unique_case_insensitively() {
        let mut names: Vec<String> = CATEGORIES.iter().map(|(n, _)| n.to_lowercase()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), CATEGORIES.len());

        let mut names: Vec<String> = PRODUCTS.iter().map(|(n, ..)| n.to_lowercase()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), PRODUCTS.len());
    }
}
