//! Deep links that hand a customer inquiry over to WhatsApp or the mail client.

use serde::{Deserialize, Serialize};

use crate::error::ContactError;
use crate::models::Product;
use crate::view::price_label;

const WHATSAPP_BASE: &str = "https://wa.me";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    /// Number that receives product inquiries.
    pub inquiry_whatsapp: String,
    /// Number that receives the contact form.
    pub form_whatsapp: String,
    pub sales_email: String,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            inquiry_whatsapp: "51905447143".to_string(),
            form_whatsapp: "51912796215".to_string(),
            sales_email: "ventas@chycinversiones.pe".to_string(),
        }
    }
}

pub fn whatsapp_url(number: &str, message: &str) -> String {
    format!("{}/{}?text={}", WHATSAPP_BASE, number, urlencoding::encode(message))
}

pub fn product_inquiry_message(product: &Product) -> String {
    format!(
        "Hola, estoy interesado en: {} - {}",
        product.nombre,
        price_label(product)
    )
}

pub fn product_whatsapp_url(product: &Product, settings: &ContactSettings) -> String {
    whatsapp_url(&settings.inquiry_whatsapp, &product_inquiry_message(product))
}

pub fn product_mailto_url(product: &Product, settings: &ContactSettings) -> String {
    let subject = format!("Consulta sobre: {}", product.nombre);
    let body = format!(
        "Estimados,\n\nEstoy interesado en obtener más información sobre:\n\n{}\nPrecio: {}\n\nQuedo atento a su respuesta.\n\nSaludos cordiales.",
        product.nombre,
        price_label(product)
    );
    format!(
        "mailto:{}?subject={}&body={}",
        settings.sales_email,
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    )
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), ContactError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ContactError::MissingField(field));
            }
        }
        Ok(())
    }

    pub fn whatsapp_message(&self) -> String {
        format!(
            "¡Hola! Soy {}.\n\n📧 Email: {}\n💬 Mensaje: {}\n\nEstoy interesado en sus servicios de alquiler de maquinaria pesada. ¿Podrían proporcionarme más información?",
            self.name.trim(),
            self.email.trim(),
            self.message.trim()
        )
    }

    /// Validates the form and builds the redirect to the contact number.
    pub fn whatsapp_url(&self, settings: &ContactSettings) -> Result<String, ContactError> {
        self.validate()?;
        Ok(whatsapp_url(&settings.form_whatsapp, &self.whatsapp_message()))
    }
}
