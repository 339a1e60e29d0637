//! Esquema Diesel (generado manualmente). Reemplazable con `diesel print-schema`.

diesel::table! {
    chemicals (id) {
        id -> Int4,
        name -> Varchar,
        cas_number -> Varchar,
        quantity -> Int4,
        unit -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    inventory_logs (id) {
        id -> Int4,
        chemical_id -> Int4,
        action_type -> Varchar,
        quantity -> Int4,
        timestamp -> Timestamptz,
    }
}

diesel::joinable!(inventory_logs -> chemicals (chemical_id));

diesel::allow_tables_to_appear_in_same_query!(
    chemicals,
    inventory_logs,
);
