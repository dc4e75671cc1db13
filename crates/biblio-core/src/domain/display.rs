use crate::domain::book::Book;
use crate::domain::member::Member;

/// Capacidad de mostrarse como ficha de texto para la interfaz.
pub trait Displayable {
  fn display_info(&self) -> String;
}

impl Displayable for Book {
  fn display_info(&self) -> String {
    format!(
      "[Libro] ID: {}\n     Título: {}\n     Autor: {}\n     Copias: {}\n",
      self.id, self.title, self.author, self.copies
    )
  }
}

/// Sin acceso al catálogo solo podemos mostrar los ids prestados; la vista
/// `MemberView` del servicio resuelve los títulos.
impl Displayable for Member {
  fn display_info(&self) -> String {
    let borrowed = self.borrowed().iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", ");
    member_card(self, &borrowed)
  }
}

pub(crate) fn member_card(member: &Member, borrowed: &str) -> String {
  let borrowed = if borrowed.is_empty() { "Ninguno" } else { borrowed };
  format!("[Socio] ID: {}\n     Nombre: {}\n     Libros prestados: {}\n", member.id, member.name, borrowed)
}
