//! Generated sample records so the marketplace starts with something to browse.
//!
//! Generation is driven by a seeded `StdRng`: the same seed always produces the
//! same accounts, catalog and menus.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{info, instrument};

use crate::app_system::{AppError, MarketplaceSystem};
use crate::domain::{DishCreate, Ingredient, ProductCreate, Quality, Role, User};

/// (name, category, pack size, dimension, base price of one pack)
const PRODUCT_TEMPLATES: &[(&str, &str, f64, &str, f64)] = &[
    ("Leche Entera", "Lácteos", 1.0, "L", 28.0),
    ("Queso Oaxaca", "Lácteos", 1.0, "kg", 160.0),
    ("Crema", "Lácteos", 500.0, "ml", 38.0),
    ("Tomate Saladet", "Verduras", 1.0, "kg", 32.0),
    ("Cebolla Blanca", "Verduras", 1.0, "kg", 26.0),
    ("Aguacate Hass", "Frutas", 1.0, "kg", 70.0),
    ("Arroz Blanco", "Granos", 1.0, "kg", 30.0),
    ("Frijol Negro", "Granos", 1.0, "kg", 42.0),
    ("Harina de Trigo", "Granos", 1.0, "kg", 24.0),
    ("Aceite Vegetal", "Abarrotes", 1.0, "L", 45.0),
    ("Huevo Blanco", "Abarrotes", 30.0, "unidades", 85.0),
    ("Pechuga de Pollo", "Carnes", 1.0, "kg", 120.0),
    ("Tortilla de Maíz", "Abarrotes", 1.0, "kg", 22.0),
    ("Azúcar Estándar", "Abarrotes", 1.0, "kg", 30.0),
];

const BRANDS: &[&str] = &["La Vaquita", "Campo Real", "Don Chuy", "Selecta", "Del Valle"];

const SUPPLIERS: &[(&str, &str, &str)] = &[
    ("Ana Torres", "ventas@lacteosnorte.mx", "Lácteos del Norte"),
    ("Luis Ramos", "pedidos@centralabastos.mx", "Central de Abastos"),
    ("Marta Gil", "contacto@granoselsur.mx", "Granos El Sur"),
];

const RESTAURANTS: &[(&str, &str, &str)] = &[
    ("Rosa Medina", "rosa@fondarosa.mx", "Fonda Rosa"),
    ("Jorge Ibarra", "jorge@lacasona.mx", "La Casona"),
];

/// (dish, category, menu price, ingredients as (name, quantity, unit, base cost))
type DishTemplate = (&'static str, &'static str, f64, &'static [(&'static str, f64, &'static str, f64)]);

const DISH_TEMPLATES: &[DishTemplate] = &[
    ("Chilaquiles Verdes", "Desayunos", 120.0, &[
        ("Tortilla", 200.0, "g", 6.0),
        ("Crema", 50.0, "ml", 5.0),
        ("Queso", 40.0, "g", 8.0),
        ("Huevo", 2.0, "unidades", 7.0),
    ]),
    ("Arroz con Pollo", "Comidas", 150.0, &[
        ("Arroz", 150.0, "g", 6.0),
        ("Pollo", 250.0, "g", 35.0),
        ("Tomate", 100.0, "g", 4.0),
        ("Aceite", 20.0, "ml", 1.5),
    ]),
    ("Enfrijoladas", "Comidas", 110.0, &[
        ("Frijol", 200.0, "g", 10.0),
        ("Tortilla", 150.0, "g", 4.5),
        ("Cebolla", 30.0, "g", 1.2),
        ("Queso", 30.0, "g", 6.0),
    ]),
    ("Guacamole", "Entradas", 95.0, &[
        ("Aguacate", 300.0, "g", 27.0),
        ("Tomate", 80.0, "g", 3.0),
        ("Cebolla", 40.0, "g", 1.5),
    ]),
    ("Arroz con Leche", "Postres", 60.0, &[
        ("Arroz", 100.0, "g", 4.0),
        ("Leche", 500.0, "ml", 18.0),
        ("Azúcar", 80.0, "g", 3.0),
    ]),
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedSummary {
    pub suppliers: Vec<String>,
    pub restaurants: Vec<String>,
    pub products: usize,
    pub dishes: usize,
}

/// Sample product payloads spread across `suppliers`.
pub fn sample_products(rng: &mut StdRng, suppliers: &[User], count: usize) -> Vec<ProductCreate> {
    if suppliers.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|i| {
            let (name, category, size, dimension, base_price) = PRODUCT_TEMPLATES[i % PRODUCT_TEMPLATES.len()];
            let supplier = &suppliers[i % suppliers.len()];
            let quality = [Quality::High, Quality::Medium, Quality::Basic][rng.gen_range(0..3)];
            // Quality and supplier move the price by up to +/-25%.
            let price = (base_price * rng.gen_range(0.75..1.25) * 100.0).round() / 100.0;
            ProductCreate {
                name: name.to_string(),
                brand: BRANDS.choose(rng).copied().unwrap_or("Genérica").to_string(),
                category: category.to_string(),
                size,
                dimension: dimension.to_string(),
                price,
                quality,
                delivery_days: rng.gen_range(1..=5),
                supplier_id: supplier.id.clone(),
                supplier_name: supplier.business_name.clone(),
                in_stock: rng.gen_bool(0.9),
            }
        })
        .collect()
}

/// Sample menu for one restaurant. Ingredient costs vary around the template.
pub fn sample_dishes(rng: &mut StdRng, restaurant: &User) -> Vec<DishCreate> {
    DISH_TEMPLATES
        .iter()
        .map(|(name, category, price, ingredients)| DishCreate {
            user_id: restaurant.id.clone(),
            name: name.to_string(),
            description: String::new(),
            category: category.to_string(),
            price: *price,
            preparation_time: rng.gen_range(10..=45),
            // Some dishes never had their servings filled in.
            monthly_servings: rng.gen_bool(0.8).then(|| rng.gen_range(20..=300)),
            ingredients: ingredients
                .iter()
                .map(|(ingredient, quantity, unit, cost)| {
                    let cost = (cost * rng.gen_range(0.9..1.6) * 100.0).round() / 100.0;
                    Ingredient::new(*ingredient, *quantity, *unit, cost)
                })
                .collect(),
        })
        .collect()
}

/// Creates the sample accounts, catalog and menus in the running stores.
#[instrument(skip(system))]
pub async fn populate(system: &MarketplaceSystem, seed: u64, product_count: usize) -> Result<SeedSummary, AppError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut summary = SeedSummary::default();

    let mut suppliers = Vec::new();
    for (name, email, business) in SUPPLIERS {
        let mut user = User::new(*name, *email, Role::Supplier);
        user.business_name = business.to_string();
        user.id = system.user_client.create_user(user.clone()).await?;
        summary.suppliers.push(user.id.clone());
        suppliers.push(user);
    }

    for (name, email, business) in RESTAURANTS {
        let mut user = User::new(*name, *email, Role::Restaurant);
        user.business_name = business.to_string();
        user.id = system.user_client.create_user(user.clone()).await?;
        summary.restaurants.push(user.id.clone());

        for dish in sample_dishes(&mut rng, &user) {
            system.dish_client.create_dish(dish).await?;
            summary.dishes += 1;
        }
    }

    for product in sample_products(&mut rng, &suppliers, product_count) {
        system.product_client.create_product(product).await?;
        summary.products += 1;
    }

    info!(
        suppliers = summary.suppliers.len(),
        restaurants = summary.restaurants.len(),
        products = summary.products,
        dishes = summary.dishes,
        "Sample data loaded"
    );
    Ok(summary)
}
