use std::collections::BTreeMap;

use crate::models::{Brand, CatalogDocument, Category, Product};

fn specs(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn machine(
    id: i64,
    nombre: &str,
    marca: &str,
    categoria: &str,
    tipo: &str,
    estado: &str,
    precio: Option<f64>,
    anio: Option<i32>,
    horas: Option<f64>,
    fecha: &str,
) -> Product {
    Product {
        id,
        nombre: nombre.to_string(),
        marca: marca.to_string(),
        modelo: None,
        categoria: categoria.to_string(),
        tipo: tipo.to_string(),
        estado: estado.to_string(),
        precio,
        moneda: "USD".to_string(),
        anio,
        horas,
        ubicacion: "Lima, Perú".to_string(),
        descripcion: String::new(),
        especificaciones: BTreeMap::new(),
        caracteristicas: Vec::new(),
        imagenes: vec![format!("assets/images/productos/{}-1.jpg", id)],
        disponible: true,
        fecha_publicacion: Some(fecha.to_string()),
    }
}

/// A small heavy-machinery dataset: ten products, two of them unavailable
/// and one without a published price.
pub fn init_mock_data() -> CatalogDocument {
    let productos = vec![
        Product {
            modelo: Some("320 GC".to_string()),
            descripcion: "Excavadora hidráulica ideal para movimiento de tierras y obras civiles.".to_string(),
            especificaciones: specs(&[
                ("peso_operativo", "22,500 kg"),
                ("potencia", "146 HP"),
                ("capacidad_cucharon", "1.2 m³"),
            ]),
            caracteristicas: strings(&["Cabina con aire acondicionado", "Martillo hidráulico opcional"]),
            imagenes: strings(&[
                "assets/images/productos/1-1.jpg",
                "assets/images/productos/1-2.jpg",
                "assets/images/productos/1-3.jpg",
            ]),
            ..machine(1, "Excavadora CAT 320", "Caterpillar", "excavadoras", "venta", "usado", Some(150000.0), Some(2019), Some(4200.0), "2024-05-10")
        },
        Product {
            descripcion: "Cargador frontal con cucharón de uso general.".to_string(),
            ..machine(2, "Cargador Frontal 950H", "Caterpillar", "cargadores", "alquiler", "usado", Some(450.0), Some(2016), Some(9800.0), "2024-03-02")
        },
        Product {
            descripcion: "Excavadora mediana de bajo consumo.".to_string(),
            ..machine(3, "Excavadora PC200-8", "Komatsu", "excavadoras", "venta", "usado", Some(98000.0), Some(2017), Some(7600.0), "2024-06-18")
        },
        Product {
            descripcion: "Retroexcavadora 4x4 con brazo extensible.".to_string(),
            ..machine(4, "Retroexcavadora 310L", "John Deere", "retroexcavadoras", "venta", "nuevo", Some(125000.0), Some(2023), Some(0.0), "2024-07-01")
        },
        Product {
            descripcion: "Rodillo vibratorio para compactación de suelos.".to_string(),
            ..machine(5, "Rodillo Compactador CS56B", "Caterpillar", "rodillos", "alquiler", "usado", Some(380.0), Some(2018), Some(6100.0), "2024-01-20")
        },
        Product {
            descripcion: "Tractor de orugas para empuje pesado. Precio a consultar.".to_string(),
            ..machine(6, "Tractor de Orugas D6T", "Caterpillar", "tractores", "venta", "usado", None, Some(2015), Some(12500.0), "2023-11-05")
        },
        Product {
            descripcion: "Excavadora compacta para espacios reducidos.".to_string(),
            ..machine(7, "Miniexcavadora EC55", "Volvo", "excavadoras", "alquiler", "nuevo", Some(220.0), Some(2022), Some(350.0), "2024-08-12")
        },
        Product {
            descripcion: "Retroexcavadora de alto rendimiento.".to_string(),
            ..machine(8, "Retroexcavadora 3CX", "JCB", "retroexcavadoras", "alquiler", "usado", Some(300.0), None, None, "2024-02-14")
        },
        Product {
            disponible: false,
            ..machine(9, "Motoniveladora 140K", "Caterpillar", "motoniveladoras", "venta", "usado", Some(135000.0), Some(2014), Some(15000.0), "2023-09-30")
        },
        Product {
            disponible: false,
            ..machine(10, "Cargador WA380", "Komatsu", "cargadores", "venta", "usado", Some(87000.0), Some(2015), Some(11000.0), "2023-08-21")
        },
    ];

    let categorias = [
        ("excavadoras", "Excavadoras"),
        ("cargadores", "Cargadores Frontales"),
        ("retroexcavadoras", "Retroexcavadoras"),
        ("rodillos", "Rodillos Compactadores"),
        ("tractores", "Tractores de Orugas"),
        ("motoniveladoras", "Motoniveladoras"),
    ]
    .iter()
    .map(|(id, nombre)| Category {
        id: id.to_string(),
        nombre: nombre.to_string(),
        icono: None,
    })
    .collect();

    let marcas = ["Caterpillar", "Komatsu", "John Deere", "Volvo", "JCB"]
        .iter()
        .map(|nombre| Brand {
            id: crate::catalog::brand_slug(nombre),
            nombre: nombre.to_string(),
            icono: Some(format!("assets/images/marcas/{}.png", crate::catalog::brand_slug(nombre))),
        })
        .collect();

    CatalogDocument {
        productos,
        categorias,
        marcas,
    }
}
