use crate::data::{ComparisonData, ComparisonRow, Insulation, Product, Variant};

fn insulation_label(insulation: Insulation) -> String {
    match insulation {
        Insulation::Sval => "Kølig".to_string(),
        other => other.to_string(),
    }
}

fn properties_and_certifications(product: &Product) -> String {
    let tags: Vec<&str> = product
        .properties
        .iter()
        .chain(&product.certifications)
        .map(String::as_str)
        .collect();
    if tags.is_empty() {
        "-".to_string()
    } else {
        tags.join(", ")
    }
}

fn yes_no(value: bool) -> String {
    let label = if value { "Ja" } else { "Nej" };
    label.to_string()
}

fn row(
    field: &str,
    label: &str,
    value1: String,
    value2: String,
    is_different: bool,
) -> ComparisonRow {
    ComparisonRow {
        field: field.to_string(),
        label: label.to_string(),
        value1,
        value2,
        is_different,
    }
}

/// Compare two products side by side, each in the variant it would be offered in.
pub fn compare(left: (&Product, &Variant), right: (&Product, &Variant)) -> ComparisonData {
    let (p1, v1) = left;
    let (p2, v2) = right;

    let price_diff = v1.price != v2.price;
    let type_diff = v1.duvet_type != v2.duvet_type;
    let insulation_diff = v1.insulation != v2.insulation;
    let size_diff = v1.width != v2.width || v1.length != v2.length;
    let allergy_diff = p1.allergy_friendly != p2.allergy_friendly;

    let rows = vec![
        row(
            "price",
            "Pris",
            format!("{} DKK", v1.price),
            format!("{} DKK", v2.price),
            price_diff,
        ),
        row(
            "type",
            "Type",
            v1.duvet_type.to_string(),
            v2.duvet_type.to_string(),
            type_diff,
        ),
        row(
            "insulation",
            "Varme",
            insulation_label(v1.insulation),
            insulation_label(v2.insulation),
            insulation_diff,
        ),
        row(
            "size",
            "Størrelse",
            format!("{}x{} cm", v1.width, v1.length),
            format!("{}x{} cm", v2.width, v2.length),
            size_diff,
        ),
        row(
            "allergyFriendly",
            "Allergivenlig",
            yes_no(p1.allergy_friendly),
            yes_no(p2.allergy_friendly),
            allergy_diff,
        ),
        row(
            "quality",
            "Kvalitet",
            p1.quality.to_string(),
            p2.quality.to_string(),
            p1.quality != p2.quality,
        ),
        row(
            "rating",
            "Bedømmelse",
            format!("{}/5", p1.rating),
            format!("{}/5", p2.rating),
            p1.rating != p2.rating,
        ),
        row(
            "years_warranty",
            "Garanti",
            format!("{} år", p1.years_warranty),
            format!("{} år", p2.years_warranty),
            p1.years_warranty != p2.years_warranty,
        ),
        row(
            "properties",
            "Egenskaber & Certificeringer",
            properties_and_certifications(p1),
            properties_and_certifications(p2),
            p1.properties != p2.properties || p1.certifications != p2.certifications,
        ),
        row(
            "fillings",
            "Fyld",
            p1.fillings.clone(),
            p2.fillings.clone(),
            p1.fillings != p2.fillings,
        ),
    ];

    let mut differences = Vec::new();
    if price_diff {
        differences.push(format!("Prisforskel på {} DKK", v1.price.abs_diff(v2.price)));
    }
    if type_diff {
        differences.push("Forskellige typer".to_string());
    }
    if insulation_diff {
        differences.push("Forskellige varmeniveauer".to_string());
    }
    if allergy_diff {
        differences.push("Forskellig allergivenlighed".to_string());
    }

    let summary = if differences.is_empty() {
        "Disse dyner er meget ens".to_string()
    } else {
        differences.join(", ")
    };

    tracing::debug!(
        left = %p1.id,
        right = %p2.id,
        differences = differences.len(),
        "Compared products"
    );

    ComparisonData {
        product1: p1.display_name(),
        variant1: v1.id.clone(),
        product2: p2.display_name(),
        variant2: v2.id.clone(),
        rows,
        differences,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DuvetType, Quality};

    fn make_pair(
        id: &str,
        price: u32,
        insulation: Insulation,
        allergy_friendly: bool,
    ) -> (Product, Variant) {
        let variant = Variant {
            id: format!("{}-v1", id),
            sku: id.into(),
            length: 200,
            width: 135,
            price,
            currency: "DKK".into(),
            duvet_type: DuvetType::Dyne,
            insulation,
        };
        let product = Product {
            id: id.into(),
            sku: id.into(),
            slug: id.into(),
            brand: "Flora".into(),
            name: id.into(),
            images: Vec::new(),
            allergy_friendly,
            certifications: Vec::new(),
            fillings: String::new(),
            properties: Vec::new(),
            quality: Quality::Gold,
            rating: 4.5,
            variants: vec![variant.clone()],
            years_warranty: 5,
        };
        (product, variant)
    }

    #[test]
    fn test_identical_products_are_alike() {
        let (p1, v1) = make_pair("a", 1000, Insulation::Normal, true);
        let (p2, v2) = make_pair("b", 1000, Insulation::Normal, true);

        let data = compare((&p1, &v1), (&p2, &v2));

        assert!(data.differences.is_empty());
        assert_eq!(data.summary, "Disse dyner er meget ens");
        assert!(data.rows.iter().all(|r| !r.is_different));
        assert_eq!(data.rows.len(), 10);
    }

    #[test]
    fn test_differences_in_fixed_order() {
        let (p1, v1) = make_pair("a", 3200, Insulation::Sval, true);
        let (p2, mut v2) = make_pair("b", 1500, Insulation::Varm, false);
        v2.duvet_type = DuvetType::Vinterdyne;

        let data = compare((&p1, &v1), (&p2, &v2));

        assert_eq!(
            data.differences,
            vec![
                "Prisforskel på 1700 DKK",
                "Forskellige typer",
                "Forskellige varmeniveauer",
                "Forskellig allergivenlighed",
            ]
        );
        assert_eq!(data.summary, data.differences.join(", "));
        let varme = data.rows.iter().find(|r| r.field == "insulation").unwrap();
        assert_eq!(varme.value1, "Kølig");
        assert_eq!(varme.value2, "Varm");
        let allergy = data.rows.iter().find(|r| r.field == "allergyFriendly").unwrap();
        assert_eq!((allergy.value1.as_str(), allergy.value2.as_str()), ("Ja", "Nej"));
    }

    #[test]
    fn test_size_and_warranty_rows() {
        let (p1, v1) = make_pair("a", 1000, Insulation::Normal, true);
        let (mut p2, mut v2) = make_pair("b", 1000, Insulation::Normal, true);
        v2.width = 200;
        v2.length = 220;
        p2.years_warranty = 10;

        let data = compare((&p1, &v1), (&p2, &v2));

        let size = data.rows.iter().find(|r| r.field == "size").unwrap();
        assert!(size.is_different);
        assert_eq!(size.value2, "200x220 cm");
        let warranty = data.rows.iter().find(|r| r.field == "years_warranty").unwrap();
        assert_eq!(warranty.value2, "10 år");
        // Size and warranty are shown but not called out in the summary.
        assert_eq!(data.summary, "Disse dyner er meget ens");
    }

    #[test]
    fn test_price_row_always_in_dkk() {
        let (p1, v1) = make_pair("a", 1000, Insulation::Normal, true);
        let (p2, mut v2) = make_pair("b", 1250, Insulation::Normal, true);
        v2.currency = "EUR".into();

        let data = compare((&p1, &v1), (&p2, &v2));

        let price = data.rows.iter().find(|r| r.field == "price").unwrap();
        assert_eq!(price.value1, "1000 DKK");
        assert_eq!(price.value2, "1250 DKK");
        assert_eq!(data.summary, "Prisforskel på 250 DKK");
    }

    #[test]
    fn test_properties_certifications_and_fillings_rows() {
        let (mut p1, v1) = make_pair("a", 1000, Insulation::Normal, true);
        let (mut p2, v2) = make_pair("b", 1000, Insulation::Normal, true);
        p1.properties = vec!["Let".into()];
        p1.certifications = vec!["Downpass".into()];
        p1.fillings = "Gåsedun".into();
        p2.fillings = "Polyesterfibre".into();

        let data = compare((&p1, &v1), (&p2, &v2));

        let tags = data.rows.iter().find(|r| r.field == "properties").unwrap();
        assert_eq!(tags.label, "Egenskaber & Certificeringer");
        assert_eq!(tags.value1, "Let, Downpass");
        assert_eq!(tags.value2, "-");
        assert!(tags.is_different);
        let fillings = data.rows.iter().find(|r| r.field == "fillings").unwrap();
        assert_eq!(fillings.label, "Fyld");
        assert_eq!(fillings.value1, "Gåsedun");
        assert!(fillings.is_different);
    }
}
