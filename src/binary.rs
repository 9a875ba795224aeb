//! Binary format front end.
//!
//! Turns a parsed ELF or Mach-O image into the list of [`Section`]s the
//! scanner works on, together with the pointer width and byte order needed to
//! decode descriptors.

use goblin::elf::header::{EI_CLASS, ELFCLASS32, ELFCLASS64};
use goblin::elf::section_header::SHT_NOBITS;
use goblin::elf::Elf;
use goblin::mach::constants::{S_GB_ZEROFILL, S_THREAD_LOCAL_ZEROFILL, S_ZEROFILL, SECTION_TYPE};
use goblin::mach::cputype::{CpuType, CPU_TYPE_ARM, CPU_TYPE_ARM64, CPU_TYPE_X86, CPU_TYPE_X86_64};
use goblin::mach::{Mach, MachO};
use goblin::Object;

use crate::error::{Error, Result};
use crate::types::{BinaryInfo, ByteOrder, PointerWidth, Section};

/// Sections and architecture information for one binary.
#[derive(Debug, Clone)]
pub struct LoadedBinary<'a> {
    /// Short format label ("elf" or "mach-o")
    pub format: &'static str,
    pub info: BinaryInfo,
    pub sections: Vec<Section<'a>>,
}

/// Pointer width for an ELF `EI_CLASS` value.
pub fn elf_pointer_width(class: u8) -> Result<PointerWidth> {
    match class {
        ELFCLASS32 => Ok(PointerWidth::Four),
        ELFCLASS64 => Ok(PointerWidth::Eight),
        other => Err(Error::UnsupportedArchitecture(format!(
            "ELF class {}",
            other
        ))),
    }
}

/// Pointer width for a Mach-O CPU type.
pub fn macho_pointer_width(cputype: CpuType) -> Result<PointerWidth> {
    match cputype {
        CPU_TYPE_X86 | CPU_TYPE_ARM => Ok(PointerWidth::Four),
        CPU_TYPE_X86_64 | CPU_TYPE_ARM64 => Ok(PointerWidth::Eight),
        other => Err(Error::UnsupportedArchitecture(format!(
            "Mach-O cputype {:#x}",
            other
        ))),
    }
}

/// Collect sections from an ELF binary.
///
/// `SHT_NOBITS` sections have no file content. Sections whose file range
/// does not fit inside `data` are treated the same way so a truncated file
/// still yields whatever is readable.
pub fn elf_sections<'a>(elf: &Elf, data: &'a [u8]) -> Vec<Section<'a>> {
    elf.section_headers
        .iter()
        .map(|sh| {
            let name = elf.shdr_strtab.get_at(sh.sh_name);
            if sh.sh_type == SHT_NOBITS {
                return Section::zero_filled(name, sh.sh_addr);
            }

            let body = usize::try_from(sh.sh_offset)
                .ok()
                .zip(usize::try_from(sh.sh_size).ok())
                .and_then(|(start, size)| data.get(start..start.checked_add(size)?));

            match body {
                Some(body) => Section::new(name, sh.sh_addr, body),
                None => {
                    tracing::debug!(
                        "elf_sections: {} at offset {:#x} (size {:#x}) is outside the file",
                        name.unwrap_or("(unnamed)"),
                        sh.sh_offset,
                        sh.sh_size
                    );
                    Section::zero_filled(name, sh.sh_addr)
                }
            }
        })
        .collect()
}

/// Collect sections from every segment of a Mach-O binary.
pub fn macho_sections<'a>(macho: &MachO<'a>) -> Vec<Section<'a>> {
    let mut sections = Vec::new();

    for seg in &macho.segments {
        let Ok(seg_sections) = seg.sections() else {
            tracing::debug!(
                "macho_sections: cannot read sections of segment {}",
                seg.name().unwrap_or("(unnamed)")
            );
            continue;
        };

        for (sec, sec_data) in seg_sections {
            let name = sec.name().ok();
            let kind = sec.flags & SECTION_TYPE;
            if kind == S_ZEROFILL || kind == S_GB_ZEROFILL || kind == S_THREAD_LOCAL_ZEROFILL {
                sections.push(Section::zero_filled(name, sec.addr));
            } else {
                sections.push(Section::new(name, sec.addr, sec_data));
            }
        }
    }

    sections
}

/// Load sections from an ELF binary.
pub fn load_elf<'a>(elf: &Elf, data: &'a [u8]) -> Result<LoadedBinary<'a>> {
    let pointer_width = elf_pointer_width(elf.header.e_ident[EI_CLASS])?;
    let byte_order = if elf.little_endian {
        ByteOrder::Little
    } else {
        ByteOrder::Big
    };

    Ok(LoadedBinary {
        format: "elf",
        info: BinaryInfo::new(pointer_width, byte_order),
        sections: elf_sections(elf, data),
    })
}

/// Load sections from a single-architecture Mach-O binary.
pub fn load_macho<'a>(macho: &MachO<'a>) -> Result<LoadedBinary<'a>> {
    let pointer_width = macho_pointer_width(macho.header.cputype())?;
    let byte_order = if macho.little_endian {
        ByteOrder::Little
    } else {
        ByteOrder::Big
    };

    Ok(LoadedBinary {
        format: "mach-o",
        info: BinaryInfo::new(pointer_width, byte_order),
        sections: macho_sections(macho),
    })
}

/// Load sections from any supported object.
///
/// Fat Mach-O, PE and archives are reported as [`Error::UnknownFormat`].
pub fn load_object<'a>(object: &Object<'a>, data: &'a [u8]) -> Result<LoadedBinary<'a>> {
    match object {
        Object::Elf(elf) => load_elf(elf, data),
        Object::Mach(Mach::Binary(macho)) => load_macho(macho),
        _ => Err(Error::UnknownFormat),
    }
}
