use std::io::Write;

use biblio_core::domain::{Book, BookId, BookUpdate, Member, MemberId, MemberUpdate};
use biblio_core::ports::RecordStore;
use biblio_core::services::{LibraryService, Outcome};

use crate::cli::Command;
use crate::render::{self, Entity};

/// Runs one command against the library and writes the rendered outcome.
///
/// Only storage failures come back as `Err`; everything else (unknown ids,
/// no copies left...) is a message for the user.
pub fn execute<B, M>(lib: &mut LibraryService<B, M>, command: Command, out: &mut impl Write) -> anyhow::Result<()>
where
  B: RecordStore<Book>,
  M: RecordStore<Member>,
{
  let message = match command {
    Command::AddBook { id, title, author, copies } => {
      let outcome = lib.add_book(Book::new(id.as_str(), title.as_str(), author, copies))?;
      render::added(Entity::Book, &id, &title, outcome)
    }
    Command::UpdateBook { id, title, author, copies } => {
      match lib.update_book(&BookId::from(id), BookUpdate { title, author, copies })? {
        Outcome::Done(()) => render::updated(Entity::Book),
        Outcome::NotFound(missing) => render::not_found(&missing),
      }
    }
    Command::RemoveBook { id } => match lib.remove_book(&BookId::from(id))? {
      Outcome::Done(_) => render::removed(Entity::Book),
      Outcome::NotFound(missing) => render::not_found(&missing),
    },
    Command::ListBooks => render::book_list(lib.list_books()),
    Command::AddMember { id, name } => {
      let outcome = lib.add_member(Member::new(id.as_str(), name.as_str()))?;
      render::added(Entity::Member, &id, &name, outcome)
    }
    Command::UpdateMember { id, name } => match lib.update_member(&MemberId::from(id), MemberUpdate { name })? {
      Outcome::Done(()) => render::updated(Entity::Member),
      Outcome::NotFound(missing) => render::not_found(&missing),
    },
    Command::RemoveMember { id } => match lib.remove_member(&MemberId::from(id))? {
      Outcome::Done(_) => render::removed(Entity::Member),
      Outcome::NotFound(missing) => render::not_found(&missing),
    },
    Command::ListMembers => render::member_list(lib.list_members()),
    Command::Issue { book_id, member_id } => {
      let (book_id, member_id) = (BookId::from(book_id), MemberId::from(member_id));
      match lib.issue_book(&book_id, &member_id)? {
        Outcome::Done(result) => {
          let (name, title) = names(lib, &book_id, &member_id);
          render::borrow(result, &name, &title)
        }
        Outcome::NotFound(missing) => render::not_found(&missing),
      }
    }
    Command::Return { book_id, member_id } => {
      let (book_id, member_id) = (BookId::from(book_id), MemberId::from(member_id));
      match lib.return_book(&book_id, &member_id)? {
        Outcome::Done(result) => {
          let (name, title) = names(lib, &book_id, &member_id);
          render::give_back(result, &name, &title)
        }
        Outcome::NotFound(missing) => render::not_found(&missing),
      }
    }
  };

  writeln!(out, "{message}")?;
  Ok(())
}

/// Member name and book title, falling back to the ids.
fn names<B, M>(lib: &LibraryService<B, M>, book_id: &BookId, member_id: &MemberId) -> (String, String)
where
  B: RecordStore<Book>,
  M: RecordStore<Member>,
{
  let name = lib.member(member_id).map_or_else(|| member_id.to_string(), |v| v.member.name.clone());
  let title = lib.book(book_id).map_or_else(|| book_id.to_string(), |b| b.title.clone());
  (name, title)
}

#[cfg(test)]
mod tests {
  use super::*;
  use biblio_core::ports::MemoryRecordStore;
  use biblio_core::services::LibraryOptions;

  type TestLibrary = LibraryService<MemoryRecordStore<Book>, MemoryRecordStore<Member>>;

  fn library() -> TestLibrary {
    LibraryService::open(MemoryRecordStore::new(), MemoryRecordStore::new(), LibraryOptions::default()).unwrap()
  }

  fn run(lib: &mut TestLibrary, command: Command) -> String {
    let mut out = Vec::new();
    execute(lib, command, &mut out).unwrap();
    String::from_utf8(out).unwrap()
  }

  fn add_book(id: &str, title: &str, copies: u32) -> Command {
    Command::AddBook { id: id.into(), title: title.into(), author: "Autor".into(), copies }
  }

  #[test]
  fn issue_and_return_messages_use_names() {
    let mut lib = library();
    run(&mut lib, add_book("B1", "Rayuela", 2));
    run(&mut lib, Command::AddMember { id: "M1".into(), name: "Ana".into() });

    let issued = run(&mut lib, Command::Issue { book_id: "B1".into(), member_id: "M1".into() });
    let again = run(&mut lib, Command::Issue { book_id: "B1".into(), member_id: "M1".into() });
    let back = run(&mut lib, Command::Return { book_id: "B1".into(), member_id: "M1".into() });
    let twice = run(&mut lib, Command::Return { book_id: "B1".into(), member_id: "M1".into() });

    assert_eq!(issued, "Ana ha tomado prestado 'Rayuela'\n");
    assert_eq!(again, "Ana ya tiene prestado 'Rayuela'\n");
    assert_eq!(back, "Ana ha devuelto 'Rayuela'\n");
    assert_eq!(twice, "Ana no tiene prestado 'Rayuela'\n");
  }

  #[test]
  fn unavailable_book_message() {
    let mut lib = library();
    run(&mut lib, add_book("B5", "Sin copias", 0));
    run(&mut lib, Command::AddMember { id: "M5".into(), name: "Luis".into() });

    let msg = run(&mut lib, Command::Issue { book_id: "B5".into(), member_id: "M5".into() });

    assert_eq!(msg, "'Sin copias' no está disponible\n");
  }

  #[test]
  fn second_issue_of_last_copy_is_unavailable() {
    let mut lib = library();
    run(&mut lib, add_book("B1", "Rayuela", 1));
    run(&mut lib, Command::AddMember { id: "M1".into(), name: "Ana".into() });
    run(&mut lib, Command::Issue { book_id: "B1".into(), member_id: "M1".into() });

    let again = run(&mut lib, Command::Issue { book_id: "B1".into(), member_id: "M1".into() });

    assert_eq!(again, "'Rayuela' no está disponible\n");
  }

  #[test]
  fn removed_book_no_longer_counts_as_lent() {
    let mut lib = library();
    run(&mut lib, add_book("B1", "Rayuela", 1));
    run(&mut lib, Command::AddMember { id: "M1".into(), name: "Ana".into() });
    run(&mut lib, Command::Issue { book_id: "B1".into(), member_id: "M1".into() });
    run(&mut lib, Command::RemoveBook { id: "B1".into() });
    run(&mut lib, add_book("B1", "Rayuela (2ª ed.)", 1));

    let back = run(&mut lib, Command::Return { book_id: "B1".into(), member_id: "M1".into() });

    assert_eq!(back, "Ana no tiene prestado 'Rayuela (2ª ed.)'\n");
    assert_eq!(lib.book(&BookId::from("B1")).unwrap().copies, 1);
  }

  #[test]
  fn unknown_ids_are_reported_not_raised() {
    let mut lib = library();

    let msg = run(&mut lib, Command::Issue { book_id: "B404".into(), member_id: "M404".into() });
    let removed = run(&mut lib, Command::RemoveMember { id: "M404".into() });

    assert_eq!(msg, "❌ Libro B404 no encontrado.\n");
    assert_eq!(removed, "❌ Socio M404 no encontrado.\n");
  }

  #[test]
  fn storage_failure_propagates() {
    let books: MemoryRecordStore<Book> = MemoryRecordStore::new();
    let mut lib = LibraryService::open(books.clone(), MemoryRecordStore::new(), LibraryOptions::default()).unwrap();
    books.fail_saves(true);

    let mut out = Vec::new();
    let res = execute(&mut lib, add_book("B1", "T", 1), &mut out);

    assert!(res.is_err());
    assert!(out.is_empty());
  }

  #[test]
  fn list_members_shows_borrowed_titles() {
    let mut lib = library();
    run(&mut lib, add_book("B1", "Rayuela", 2));
    run(&mut lib, Command::AddMember { id: "M1".into(), name: "Ana".into() });
    run(&mut lib, Command::Issue { book_id: "B1".into(), member_id: "M1".into() });

    let listing = run(&mut lib, Command::ListMembers);

    assert!(listing.contains("Nombre: Ana"));
    assert!(listing.contains("Libros prestados: Rayuela"));
  }
}
