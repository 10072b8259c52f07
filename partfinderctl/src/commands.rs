use std::io::Write;

use anyhow::{Context, Result};
use partfinder_core::{
    FacetCatalog, FacetLevel, FacetOption, SearchSession, UploadRequest, YearRange,
};

use crate::cli::{Command, SearchArgs};
use crate::render;

pub async fn run<C, W>(
    command: Command,
    session: &mut SearchSession<C>,
    out: &mut W,
) -> Result<()>
where
    C: FacetCatalog,
    W: Write,
{
    match command {
        Command::Brands => {
            session
                .refresh(FacetLevel::Brand)
                .await
                .context("Failed to load brands")?;
            for brand in &session.filter().options().brands {
                writeln!(out, "{}", brand.label())?;
            }
        }
        Command::Categories => {
            session
                .refresh(FacetLevel::Category)
                .await
                .context("Failed to load categories")?;
            for category in &session.filter().options().categories {
                writeln!(out, "{}\t{}", category.id, category.label())?;
            }
        }
        Command::Models { brand } => {
            session
                .refresh(FacetLevel::Brand)
                .await
                .context("Failed to load brands")?;
            session.select_by_key(FacetLevel::Brand, &brand).await?;
            for model in &session.filter().options().models {
                writeln!(out, "{}", model.label())?;
            }
        }
        Command::Years { brand, model } => {
            session
                .refresh(FacetLevel::Brand)
                .await
                .context("Failed to load brands")?;
            session.select_by_key(FacetLevel::Brand, &brand).await?;
            session.select_by_key(FacetLevel::Model, &model).await?;
            for range in &session.filter().options().year_ranges {
                writeln!(out, "{}\t{}", range.key(), range.label().trim_end())?;
            }
        }
        Command::Search(args) => search(session, args, out).await?,
        Command::Upload { file, category } => {
            let request = UploadRequest::new(file, category)?;
            let name = request.file_name();
            let category = request.category().to_string();
            session.upload(request).await.context("Upload failed")?;
            writeln!(out, "Uploaded {name} as category '{category}'")?;
        }
    }
    Ok(())
}

async fn search<C, W>(
    session: &mut SearchSession<C>,
    args: SearchArgs,
    out: &mut W,
) -> Result<()>
where
    C: FacetCatalog,
    W: Write,
{
    // Year ranges are keyed by their wire form, so `2015-9999` becomes `2015-`.
    let year = args
        .year
        .map(|text| {
            text.parse::<YearRange>()
                .map(|range| range.encode())
                .with_context(|| format!("Invalid year range '{text}'"))
        })
        .transpose()?;

    if args.brand.is_some() {
        session
            .refresh(FacetLevel::Brand)
            .await
            .context("Failed to load brands")?;
    }
    if args.category.is_some() {
        session
            .refresh(FacetLevel::Category)
            .await
            .context("Failed to load categories")?;
    }

    let filters = [
        (FacetLevel::Brand, args.brand),
        (FacetLevel::Model, args.model),
        (FacetLevel::YearRange, year),
        (FacetLevel::Category, args.category),
    ];
    for (level, key) in filters {
        if let Some(key) = key {
            session.select_by_key(level, &key).await?;
        }
    }

    let count = session.search().await.context("Product search failed")?;
    if count == 0 {
        writeln!(out, "No parts found")?;
        return Ok(());
    }

    let page = session.results_mut().go_to(args.page);
    let results = session.results();
    write!(out, "{}", render::product_table(results.page()))?;
    writeln!(
        out,
        "\n{count} parts, page {page} of {}",
        results.total_pages()
    )?;
    if let Some(line) = render::pager_line(results) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use partfinder_core::{
        Brand, CatalogError, CatalogResult, Category, CategoryID, Model, Product,
        ProductQuery, SessionError, YearRange,
    };
    use std::sync::Mutex;

    #[derive(Default)]
    struct FixedCatalog {
        queries: Mutex<Vec<String>>,
        uploads: Mutex<Vec<String>>,
        categories_down: bool,
    }

    impl FixedCatalog {
        fn without_categories() -> Self {
            Self {
                categories_down: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl FacetCatalog for FixedCatalog {
        async fn list_brands(&self) -> CatalogResult<Vec<Brand>> {
            Ok(vec![Brand::new(1, "KTM"), Brand::new(2, "Husqvarna")])
        }

        async fn list_models(&self, brand: &Brand) -> CatalogResult<Vec<Model>> {
            Ok(match brand.name.as_str() {
                "KTM" => vec![Model::new(10, "250 SX"), Model::new(11, "350 SX-F")],
                _ => Vec::new(),
            })
        }

        async fn list_year_ranges(
            &self,
            _brand: &Brand,
            _model: &Model,
        ) -> CatalogResult<Vec<YearRange>> {
            Ok(vec![
                YearRange {
                    start_year: 2008,
                    end_year: 2011,
                },
                YearRange::open_ended(2016),
            ])
        }

        async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
            if self.categories_down {
                return Err(CatalogError::InvalidUrl("categories offline".into()));
            }
            Ok(vec![Category::new(12, "Suspension")])
        }

        async fn search_products(
            &self,
            query: &ProductQuery,
        ) -> CatalogResult<Vec<Product>> {
            self.queries.lock().unwrap().push(query.to_query_string());
            Ok((0..40)
                .map(|n| Product::new(format!("KT{n}"), "Fork seal", CategoryID(12)))
                .collect())
        }

        async fn upload_csv(&self, request: UploadRequest) -> CatalogResult<()> {
            self.uploads
                .lock()
                .unwrap()
                .push(request.category().to_string());
            Ok(())
        }
    }

    async fn run_to_string(
        session: &mut SearchSession<FixedCatalog>,
        command: Command,
    ) -> Result<String> {
        let mut out = Vec::new();
        run(command, session, &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn lists_brands_and_models() {
        let mut session = SearchSession::new(FixedCatalog::default());
        let brands = run_to_string(&mut session, Command::Brands).await.unwrap();
        assert_eq!(brands, "KTM\nHusqvarna\n");

        let mut session = SearchSession::new(FixedCatalog::default());
        let models = run_to_string(
            &mut session,
            Command::Models {
                brand: "KTM".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(models, "250 SX\n350 SX-F\n");
    }

    #[tokio::test]
    async fn years_show_key_and_label() {
        let mut session = SearchSession::new(FixedCatalog::default());
        let years = run_to_string(
            &mut session,
            Command::Years {
                brand: "KTM".into(),
                model: "250 SX".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(years, "2008-2011\t2008 - 2011\n2016-\t2016 -\n");
    }

    #[tokio::test]
    async fn search_encodes_filters_and_pages() {
        let mut session = SearchSession::new(FixedCatalog::default());
        let output = run_to_string(
            &mut session,
            Command::Search(SearchArgs {
                brand: Some("KTM".into()),
                model: Some("350 SX-F".into()),
                year: Some("2016-".into()),
                category: Some("12".into()),
                page: 2,
            }),
        )
        .await
        .unwrap();

        assert_eq!(
            session.catalog().queries.lock().unwrap().as_slice(),
            ["brand=KTM&model=350+SX-F&year=2016-&category_id=12"]
        );
        assert!(output.contains("KT30"));
        assert!(!output.contains("KT29 "));
        assert!(output.contains("40 parts, page 2 of 2"));
        assert!(output.ends_with("‹ Prev 1 [2]\n"));
    }

    #[tokio::test]
    async fn brand_commands_ignore_category_outage() {
        let mut session = SearchSession::new(FixedCatalog::without_categories());
        let brands = run_to_string(&mut session, Command::Brands).await.unwrap();
        assert_eq!(brands, "KTM\nHusqvarna\n");

        let mut session = SearchSession::new(FixedCatalog::without_categories());
        let output = run_to_string(
            &mut session,
            Command::Search(SearchArgs {
                brand: Some("KTM".into()),
                page: 1,
                ..SearchArgs::default()
            }),
        )
        .await
        .unwrap();
        assert!(output.contains("40 parts"));

        let mut session = SearchSession::new(FixedCatalog::without_categories());
        let err = run_to_string(&mut session, Command::Categories)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to load categories"));
    }

    #[tokio::test]
    async fn search_accepts_explicit_open_end_year() {
        let mut session = SearchSession::new(FixedCatalog::default());
        run_to_string(
            &mut session,
            Command::Search(SearchArgs {
                brand: Some("KTM".into()),
                model: Some("250 SX".into()),
                year: Some("2016-9999".into()),
                page: 1,
                ..SearchArgs::default()
            }),
        )
        .await
        .unwrap();

        assert_eq!(
            session.catalog().queries.lock().unwrap().as_slice(),
            ["brand=KTM&model=250+SX&year=2016-"]
        );
    }

    #[tokio::test]
    async fn search_rejects_malformed_year() {
        let mut session = SearchSession::new(FixedCatalog::default());
        let err = run_to_string(
            &mut session,
            Command::Search(SearchArgs {
                brand: Some("KTM".into()),
                model: Some("250 SX".into()),
                year: Some("recent".into()),
                page: 1,
                ..SearchArgs::default()
            }),
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("Invalid year range 'recent'"));
        assert!(session.catalog().queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_rejects_unknown_brand() {
        let mut session = SearchSession::new(FixedCatalog::default());
        let err = run_to_string(
            &mut session,
            Command::Search(SearchArgs {
                brand: Some("Yamaha".into()),
                page: 1,
                ..SearchArgs::default()
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SessionError>(),
            Some(SessionError::UnknownOption { .. })
        ));
        assert!(session.catalog().queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn upload_reports_category() {
        let mut session = SearchSession::new(FixedCatalog::default());
        let output = run_to_string(
            &mut session,
            Command::Upload {
                file: "brakes.csv".into(),
                category: "Brakes".into(),
            },
        )
        .await
        .unwrap();

        assert_eq!(output, "Uploaded brakes.csv as category 'Brakes'\n");
        assert_eq!(session.catalog().uploads.lock().unwrap().as_slice(), ["Brakes"]);
    }

    #[tokio::test]
    async fn upload_rejects_non_csv_before_sending() {
        let mut session = SearchSession::new(FixedCatalog::default());
        let err = run_to_string(
            &mut session,
            Command::Upload {
                file: "brakes.xlsx".into(),
                category: "Brakes".into(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::InvalidUpload(_))
        ));
        assert!(session.catalog().uploads.lock().unwrap().is_empty());
    }
}
