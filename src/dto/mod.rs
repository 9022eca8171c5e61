pub mod document_dto;
pub mod page_dto;
