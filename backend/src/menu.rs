use std::io::{BufRead, Write};

use biblio_core::domain::{Book, Member};
use biblio_core::ports::RecordStore;
use biblio_core::services::LibraryService;

use crate::cli::{Command, non_empty};
use crate::commands::execute;

const MENU: &str = "\
==============================
📚 Bienvenido a la Biblioteca 📚
==============================
0. ❓ Ayuda
1. ➕ Añadir libro
2. 📖 Ver libros
3. ✏️ Actualizar libro
4. ❌ Eliminar libro
5. 👤 Añadir socio
6. 👥 Ver socios
7. ✏️ Actualizar socio
8. ❌ Eliminar socio
9. 📚 Prestar libro
10. 🔁 Devolver libro
11. 🚪 Salir";

const HELP: &str = "
📘 Ayuda:
0 - Muestra esta ayuda
1 - Añade un libro nuevo al catálogo
2 - Muestra todos los libros
3 - Cambia título, autor o copias de un libro (Enter deja el valor actual)
4 - Elimina un libro del catálogo
5 - Da de alta un socio
6 - Muestra todos los socios y sus préstamos
7 - Cambia el nombre de un socio (Enter lo deja igual)
8 - Da de baja un socio
9 - Presta un libro a un socio
10 - Registra la devolución de un libro
11 - Sale del programa
";

/// Line-oriented prompt over any reader/writer pair.
pub struct Prompt<R, W> {
  input: R,
  out: W,
}

/// What the user typed: a line, or end of input.
enum Answer {
  Line(String),
  Eof,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
  pub fn new(input: R, out: W) -> Self {
    Self { input, out }
  }

  fn ask(&mut self, label: &str) -> std::io::Result<Answer> {
    write!(self.out, "{label}")?;
    self.out.flush()?;

    let mut line = String::new();
    if self.input.read_line(&mut line)? == 0 {
      return Ok(Answer::Eof);
    }
    Ok(Answer::Line(line.trim_end_matches(['\r', '\n']).to_string()))
  }

  fn say(&mut self, message: &str) -> std::io::Result<()> {
    writeln!(self.out, "{message}")
  }
}

/// Either a command to run, a message to show instead, or end of input.
enum Step {
  Run(Command),
  Say(&'static str),
  Quit,
}

macro_rules! answer {
  ($prompt:expr, $label:expr) => {
    match $prompt.ask($label)? {
      Answer::Line(line) => line,
      Answer::Eof => return Ok(Step::Quit),
    }
  };
}

macro_rules! id {
  ($prompt:expr, $label:expr) => {
    match non_empty(&answer!($prompt, $label)) {
      Ok(id) => id,
      Err(_) => return Ok(Step::Say("❌ El ID no puede estar vacío.")),
    }
  };
}

/// Empty input means "leave unchanged".
fn optional(line: String) -> Option<String> {
  if line.is_empty() { None } else { Some(line) }
}

/// Runs the interactive menu until the user quits or input ends.
///
/// A storage failure stops the loop and is returned to the caller: once a
/// write failed, memory and disk may disagree.
pub fn run_menu<B, M, R, W>(lib: &mut LibraryService<B, M>, prompt: &mut Prompt<R, W>) -> anyhow::Result<()>
where
  B: RecordStore<Book>,
  M: RecordStore<Member>,
  R: BufRead,
  W: Write,
{
  loop {
    prompt.say(MENU)?;
    let choice = match prompt.ask("Elige una opción (0-11): ")? {
      Answer::Line(line) => line,
      Answer::Eof => break,
    };

    match choice.trim() {
      "0" => prompt.say(HELP)?,
      "11" => {
        prompt.say("Gracias por usar la biblioteca. ¡Hasta pronto! 👋")?;
        return Ok(());
      }
      other => match read_command(other, prompt)? {
        Step::Run(command) => execute(lib, command, &mut prompt.out)?,
        Step::Say(message) => prompt.say(message)?,
        Step::Quit => break,
      },
    }
  }

  tracing::debug!("input closed, leaving menu");
  Ok(())
}

/// Asks for the fields a menu option needs and turns them into a `Command`.
fn read_command<R: BufRead, W: Write>(choice: &str, prompt: &mut Prompt<R, W>) -> std::io::Result<Step> {
  let command = match choice {
    "1" => {
      prompt.say("-- Añadir libro --")?;
      let id = id!(prompt, "ID del libro: ");
      let title = answer!(prompt, "Título: ");
      let author = answer!(prompt, "Autor: ");
      let Ok(copies) = answer!(prompt, "Número de copias: ").trim().parse::<u32>() else {
        return Ok(Step::Say("❌ Número de copias no válido."));
      };
      Command::AddBook { id, title, author, copies }
    }
    "2" => Command::ListBooks,
    "3" => {
      prompt.say("-- Actualizar libro --")?;
      let id = id!(prompt, "ID del libro: ");
      let title = optional(answer!(prompt, "Nuevo título (Enter para omitir): "));
      let author = optional(answer!(prompt, "Nuevo autor (Enter para omitir): "));
      let copies = match optional(answer!(prompt, "Nuevo número de copias (Enter para omitir): ")) {
        None => None,
        Some(raw) => match raw.trim().parse::<u32>() {
          Ok(n) => Some(n),
          Err(_) => return Ok(Step::Say("❌ Número de copias no válido.")),
        },
      };
      Command::UpdateBook { id, title, author, copies }
    }
    "4" => {
      prompt.say("-- Eliminar libro --")?;
      Command::RemoveBook { id: id!(prompt, "ID del libro: ") }
    }
    "5" => {
      prompt.say("-- Añadir socio --")?;
      let id = id!(prompt, "ID del socio: ");
      let name = answer!(prompt, "Nombre: ");
      Command::AddMember { id, name }
    }
    "6" => Command::ListMembers,
    "7" => {
      prompt.say("-- Actualizar socio --")?;
      let id = id!(prompt, "ID del socio: ");
      let name = optional(answer!(prompt, "Nuevo nombre (Enter para omitir): "));
      Command::UpdateMember { id, name }
    }
    "8" => {
      prompt.say("-- Eliminar socio --")?;
      Command::RemoveMember { id: id!(prompt, "ID del socio: ") }
    }
    "9" => {
      prompt.say("-- Prestar libro --")?;
      let book_id = id!(prompt, "ID del libro: ");
      let member_id = id!(prompt, "ID del socio: ");
      Command::Issue { book_id, member_id }
    }
    "10" => {
      prompt.say("-- Devolver libro --")?;
      let book_id = id!(prompt, "ID del libro: ");
      let member_id = id!(prompt, "ID del socio: ");
      Command::Return { book_id, member_id }
    }
    _ => return Ok(Step::Say("❗ Opción no válida. Inténtalo de nuevo.")),
  };

  Ok(Step::Run(command))
}

#[cfg(test)]
mod tests {
  use super::*;
  use biblio_core::domain::{BookId, MemberId};
  use biblio_core::ports::MemoryRecordStore;
  use biblio_core::services::LibraryOptions;
  use std::io::Cursor;

  type TestLibrary = LibraryService<MemoryRecordStore<Book>, MemoryRecordStore<Member>>;

  fn session(lib: &mut TestLibrary, script: &str) -> String {
    let mut out = Vec::new();
    {
      let mut prompt = Prompt::new(Cursor::new(script.as_bytes()), &mut out);
      run_menu(lib, &mut prompt).unwrap();
    }
    String::from_utf8(out).unwrap()
  }

  fn library() -> TestLibrary {
    LibraryService::open(MemoryRecordStore::new(), MemoryRecordStore::new(), LibraryOptions::default()).unwrap()
  }

  #[test]
  fn add_issue_and_quit() {
    let mut lib = library();

    let out = session(&mut lib, "1\nB1\nRayuela\nCortázar\n1\n5\nM1\nAna\n9\nB1\nM1\n11\n");

    assert!(out.contains("✅ Libro 'Rayuela' añadido."));
    assert!(out.contains("✅ Socio 'Ana' añadido."));
    assert!(out.contains("Ana ha tomado prestado 'Rayuela'"));
    assert!(out.contains("¡Hasta pronto!"));
    assert_eq!(lib.book(&BookId::from("B1")).unwrap().copies, 0);
  }

  #[test]
  fn update_with_blank_fields_keeps_them() {
    let mut lib = library();
    session(&mut lib, "1\nB1\nTítulo\nAutor\n2\n11\n");

    let out = session(&mut lib, "3\nB1\n\n\n5\n11\n");

    assert!(out.contains("🔄 Libro actualizado."));
    let book = lib.book(&BookId::from("B1")).unwrap();
    assert_eq!((book.title.as_str(), book.author.as_str(), book.copies), ("Título", "Autor", 5));
  }

  #[test]
  fn update_member_with_blank_name_is_a_no_op() {
    let mut lib = library();
    session(&mut lib, "5\nM1\nAna\n7\nM1\n\n11\n");

    let view = lib.member(&MemberId::from("M1")).unwrap();
    assert_eq!(view.member.name, "Ana");
  }

  #[test]
  fn invalid_copies_returns_to_menu() {
    let mut lib = library();

    let out = session(&mut lib, "1\nB1\nT\nA\nmuchas\n2\n11\n");

    assert!(out.contains("❌ Número de copias no válido."));
    assert!(out.contains("No hay libros en la biblioteca."));
  }

  #[test]
  fn blank_id_and_unknown_option_are_reported() {
    let mut lib = library();

    let out = session(&mut lib, "4\n   \n42\n11\n");

    assert!(out.contains("❌ El ID no puede estar vacío."));
    assert!(out.contains("❗ Opción no válida."));
  }

  #[test]
  fn help_then_end_of_input() {
    let mut lib = library();

    let out = session(&mut lib, "0\n");

    assert!(out.contains("📘 Ayuda:"));
    assert!(!out.contains("¡Hasta pronto!"));
  }

  #[test]
  fn end_of_input_mid_prompt_quits_cleanly() {
    let mut lib = library();

    session(&mut lib, "1\nB1\nSolo título");

    assert!(lib.book(&BookId::from("B1")).is_none());
  }

  #[test]
  fn list_and_return_flow() {
    let mut lib = library();
    session(&mut lib, "1\nB1\nRayuela\nCortázar\n1\n5\nM1\nAna\n9\nB1\nM1\n11\n");

    let out = session(&mut lib, "6\n10\nB1\nM1\n10\nB1\nM1\n2\n11\n");

    assert!(out.contains("Libros prestados: Rayuela"));
    assert!(out.contains("Ana ha devuelto 'Rayuela'"));
    assert!(out.contains("Ana no tiene prestado 'Rayuela'"));
    assert!(out.contains("Copias: 1"));
  }
}
