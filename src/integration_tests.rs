#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use float_cmp::approx_eq;

    use crate::app_system::MarketplaceSystem;
    use crate::clients::{CostAnalysisClient, DishClient, ProductClient};
    use crate::config::Config;
    use crate::domain::{Dish, DishCreate, Ingredient, Product, ProductCreate, Quality, Role, User};
    use crate::import::{import_products, load_file};
    use crate::mock_framework::{create_mock_client, expect_list};
    use crate::session::{self, MemorySessionStore, SessionError, SessionStore};
    use crate::{product_actor, user_actor};

    fn test_config() -> Config {
        Config::from_lookup(|_| None).unwrap()
    }

    fn leche(supplier_id: &str, price: f64) -> ProductCreate {
        ProductCreate {
            name: "Leche Entera".to_string(),
            brand: "La Vaquita".to_string(),
            category: "Lácteos".to_string(),
            size: 1.0,
            dimension: "L".to_string(),
            price,
            quality: Quality::High,
            delivery_days: 2,
            supplier_id: supplier_id.to_string(),
            supplier_name: "Lácteos del Norte".to_string(),
            in_stock: true,
        }
    }

    fn flan(user_id: &str) -> DishCreate {
        DishCreate {
            user_id: user_id.to_string(),
            name: "Flan".to_string(),
            description: "Flan napolitano".to_string(),
            category: "Postres".to_string(),
            price: 55.0,
            preparation_time: 40,
            monthly_servings: Some(10),
            ingredients: vec![Ingredient::new("Leche", 1.0, "L", 50.0)],
        }
    }

    #[tokio::test]
    async fn test_cost_report_flow() {
        // 1. Setup Mocks
        let (dish_inner, mut dish_rx) = create_mock_client::<Dish>(10);
        let (product_inner, mut product_rx) = create_mock_client::<Product>(10);
        let analysis = CostAnalysisClient::new(DishClient::new(dish_inner), ProductClient::new(product_inner));

        let dishes = vec![
            Dish::new("dish_1", "user_1", "Flan")
                .with_servings(10)
                .with_ingredient(Ingredient::new("Leche", 1.0, "L", 50.0)),
            // Another restaurant's menu never reaches the report.
            Dish::new("dish_2", "user_2", "Atole")
                .with_servings(99)
                .with_ingredient(Ingredient::new("Leche", 1.0, "L", 90.0)),
        ];
        let catalog = vec![Product::new("product_1", "Leche Entera", 1.0, "L", 40.0)];

        // 2. Request the report in the background
        let client = analysis.clone();
        let task = tokio::spawn(async move { client.report_for("user_1".to_string()).await });

        // 3. Answer the dish snapshot, then the catalog snapshot
        let responder = expect_list(&mut dish_rx).await.expect("Expected Dish List");
        responder.send(Ok(dishes.clone())).unwrap();
        let responder = expect_list(&mut product_rx).await.expect("Expected Product List");
        responder.send(Ok(catalog.clone())).unwrap();

        // 4. Verify Result
        let report = task.await.unwrap().unwrap();
        assert_eq!(report.results.len(), 1);
        let leche = &report.results[0];
        assert_eq!(leche.ingredient.total_monthly_servings, 10);
        assert_eq!(leche.alternative.as_ref().map(|a| a.product.id.as_str()), Some("product_1"));
        assert!(approx_eq!(f64, report.total_monthly_savings, 100.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, report.total_annual_savings, 1200.0, epsilon = 1e-9));

        // 5. Same snapshots again: the cached report comes back
        let client = analysis.clone();
        let task = tokio::spawn(async move { client.report_for("user_1".to_string()).await });
        expect_list(&mut dish_rx).await.unwrap().send(Ok(dishes.clone())).unwrap();
        expect_list(&mut product_rx).await.unwrap().send(Ok(catalog.clone())).unwrap();
        let cached = task.await.unwrap().unwrap();
        assert!(Arc::ptr_eq(&report, &cached));

        // 6. A repriced catalog invalidates it
        let mut repriced = catalog.clone();
        repriced[0].price = 45.0;
        let client = analysis.clone();
        let task = tokio::spawn(async move { client.report_for("user_1".to_string()).await });
        expect_list(&mut dish_rx).await.unwrap().send(Ok(dishes)).unwrap();
        expect_list(&mut product_rx).await.unwrap().send(Ok(repriced)).unwrap();
        let fresh = task.await.unwrap().unwrap();
        assert!(!Arc::ptr_eq(&report, &fresh));
        assert!(approx_eq!(f64, fresh.total_monthly_savings, 50.0, epsilon = 1e-9));
    }

    #[tokio::test]
    async fn test_end_to_end_cost_report() {
        let system = MarketplaceSystem::new(&test_config());

        let supplier_id = system
            .user_client
            .create_user(User::new("Ana", "ana@norte.mx", Role::Supplier))
            .await
            .unwrap();
        let restaurant_id = system
            .user_client
            .create_user(User::new("Rosa", "rosa@fonda.mx", Role::Restaurant))
            .await
            .unwrap();

        let product_id = system.product_client.create_product(leche(&supplier_id, 40.0)).await.unwrap();
        system.dish_client.create_dish(flan(&restaurant_id)).await.unwrap();

        let report = system.analysis_client.report_for(restaurant_id.clone()).await.unwrap();
        let result = &report.results[0];
        assert_eq!(result.alternative.as_ref().map(|a| a.product.id.clone()), Some(product_id.clone()));
        assert!(approx_eq!(f64, result.potential_savings_per_unit, 10.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, result.savings_percentage, 20.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, report.total_current_cost, 50.0, epsilon = 1e-9));

        let again = system.analysis_client.report_for(restaurant_id.clone()).await.unwrap();
        assert!(Arc::ptr_eq(&report, &again));

        // A stock change shows up in the next report instead of the cached product.
        system.product_client.set_in_stock(product_id.clone(), false).await.unwrap();
        let report = system.analysis_client.report_for(restaurant_id.clone()).await.unwrap();
        assert!(!Arc::ptr_eq(&again, &report));
        let shown = report.results[0].alternative.as_ref().map(|a| a.product.in_stock);
        assert_eq!(shown, Some(false));

        // Supplier raises the price above the restaurant's cost: no alternative left.
        let previous = system.product_client.reprice(product_id, 60.0).await.unwrap();
        assert_eq!(previous, 40.0);
        let report = system.analysis_client.report_for(restaurant_id).await.unwrap();
        assert!(report.results[0].alternative.is_none());
        assert_eq!(report.total_monthly_savings, 0.0);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_import_into_store() {
        let (actor, products) = product_actor::new(16);
        let handle = tokio::spawn(actor.run());

        let mut supplier = User::new("Luis", "luis@abastos.mx", Role::Supplier);
        supplier.id = "user_2".to_string();
        supplier.business_name = "Central de Abastos".to_string();

        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "name,brand,category,size,dimension,price,quality,deliveryDays,inStock").unwrap();
        writeln!(file, "Arroz Blanco,Selecta,Granos,1,kg,28,media,2,si").unwrap();
        writeln!(file, "Frijol Negro,Selecta,Granos,1,kg,cuarenta,media,2,si").unwrap();
        writeln!(file, "Azúcar,Selecta,Abarrotes,1,kg,0,basica,1,no").unwrap();
        file.flush().unwrap();

        let batch = load_file(file.path(), &supplier).unwrap();
        assert_eq!(batch.rows.len(), 2);
        assert_eq!(batch.rejected[0].line, 3);

        // Price 0 parses but the store refuses it.
        let outcome = import_products(&products, batch).await;
        assert_eq!(outcome.created, vec!["product_1".to_string()]);
        let mut lines: Vec<usize> = outcome.rejected.iter().map(|r| r.line).collect();
        lines.sort();
        assert_eq!(lines, vec![3, 4]);

        let stored = products.list_products_by_supplier("user_2".to_string()).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].supplier_name, "Central de Abastos");
        assert_eq!(stored[0].quality, Quality::Medium);

        drop(products);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_session_login_and_stale_restore() {
        let (actor, users) = user_actor::new(16);
        let handle = tokio::spawn(actor.run());
        let store = MemorySessionStore::default();

        let err = session::login_as(&users, &store, Role::Restaurant).await.unwrap_err();
        assert!(matches!(err, SessionError::NoAccount(Role::Restaurant)));

        users.create_user(User::new("Ana", "ana@norte.mx", Role::Supplier)).await.unwrap();
        let rosa_id = users.create_user(User::new("Rosa", "rosa@fonda.mx", Role::Restaurant)).await.unwrap();

        let user = session::login_as(&users, &store, Role::Restaurant).await.unwrap();
        assert_eq!(user.id, rosa_id);
        let restored = session::restore(&users, &store).await.unwrap();
        assert_eq!(restored.map(|u| u.id), Some(rosa_id.clone()));

        users.delete_user(rosa_id).await.unwrap();
        assert_eq!(session::restore(&users, &store).await.unwrap(), None);
        assert!(store.load().unwrap().is_none());

        drop(users);
        handle.await.unwrap();
    }
}
