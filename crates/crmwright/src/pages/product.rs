//! Products and product categories

use crate::form::FieldSpec;
use crate::page_object::RecordPage;

const PRODUCT_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Product Name").with_synonyms(&["Name"]).required(),
    FieldSpec::text("Product Code").with_synonyms(&["Code", "SKU"]),
    FieldSpec::picklist("Product Family").with_synonyms(&["Family"]),
    FieldSpec::checkbox("Active"),
    FieldSpec::picklist("Quantity Unit Of Measure").with_synonyms(&["Unit"]),
    FieldSpec::text_area("Product Description").with_synonyms(&["Description"]),
];

const CATEGORY_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name").with_synonyms(&["Category Name"]).required(),
    FieldSpec::lookup("Catalog").required(),
    FieldSpec::lookup("Parent Category"),
    FieldSpec::text("Sort Order"),
    FieldSpec::checkbox("Is Navigational").with_synonyms(&["Navigational"]),
    FieldSpec::text_area("Description"),
];

/// Product record page
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductPage;

impl RecordPage for ProductPage {
    fn object_name(&self) -> &'static str {
        "Products"
    }

    fn api_name(&self) -> &'static str {
        "Product2"
    }

    fn fields(&self) -> &'static [FieldSpec] {
        PRODUCT_FIELDS
    }
}

/// Product category record page (B2B/B2C Commerce catalogs)
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductCategoryPage;

impl RecordPage for ProductCategoryPage {
    fn object_name(&self) -> &'static str {
        "Product Categories"
    }

    fn api_name(&self) -> &'static str {
        "ProductCategory"
    }

    fn fields(&self) -> &'static [FieldSpec] {
        CATEGORY_FIELDS
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["Category", "Categories"]
    }
}
