//! Hand-assembled ELF and Mach-O images for integration tests.
#![allow(dead_code)]

pub const SHT_PROGBITS: u32 = 1;
pub const SHT_STRTAB: u32 = 3;
pub const SHT_NOBITS: u32 = 8;

/// Serialize `(ptr, len)` pairs in the given layout.
pub fn descriptors(is_64: bool, little: bool, pairs: &[(u64, u64)]) -> Vec<u8> {
    let w = Words { is_64, little };
    let mut out = Vec::new();
    for &(ptr, len) in pairs {
        w.addr(&mut out, ptr);
        w.addr(&mut out, len);
    }
    out
}

#[derive(Clone, Copy)]
struct Words {
    is_64: bool,
    little: bool,
}

impl Words {
    fn u16(&self, out: &mut Vec<u8>, v: u16) {
        if self.little {
            out.extend_from_slice(&v.to_le_bytes());
        } else {
            out.extend_from_slice(&v.to_be_bytes());
        }
    }

    fn u32(&self, out: &mut Vec<u8>, v: u32) {
        if self.little {
            out.extend_from_slice(&v.to_le_bytes());
        } else {
            out.extend_from_slice(&v.to_be_bytes());
        }
    }

    fn u64(&self, out: &mut Vec<u8>, v: u64) {
        if self.little {
            out.extend_from_slice(&v.to_le_bytes());
        } else {
            out.extend_from_slice(&v.to_be_bytes());
        }
    }

    /// Native word: 8 bytes on 64-bit, 4 bytes on 32-bit.
    fn addr(&self, out: &mut Vec<u8>, v: u64) {
        if self.is_64 {
            self.u64(out, v);
        } else {
            self.u32(out, v as u32);
        }
    }
}

fn align(out: &mut Vec<u8>, to: usize) {
    while out.len() % to != 0 {
        out.push(0);
    }
}

fn name16(out: &mut Vec<u8>, name: &str) {
    let mut buf = [0u8; 16];
    buf[..name.len()].copy_from_slice(name.as_bytes());
    out.extend_from_slice(&buf);
}

struct ElfSection {
    name: String,
    sh_type: u32,
    addr: u64,
    data: Vec<u8>,
    /// Size recorded in the header for NOBITS sections
    size: u64,
    /// Forced file offset, for sections that point past the end of the file
    offset: Option<u64>,
}

/// Builds a minimal relocatable-style ELF image with section headers only.
pub struct ElfBuilder {
    words: Words,
    sections: Vec<ElfSection>,
}

impl ElfBuilder {
    pub fn new(is_64: bool, little: bool) -> Self {
        Self {
            words: Words { is_64, little },
            sections: Vec::new(),
        }
    }

    pub fn section(mut self, name: &str, addr: u64, data: &[u8]) -> Self {
        self.sections.push(ElfSection {
            name: name.to_string(),
            sh_type: SHT_PROGBITS,
            addr,
            data: data.to_vec(),
            size: data.len() as u64,
            offset: None,
        });
        self
    }

    pub fn nobits(mut self, name: &str, addr: u64, size: u64) -> Self {
        self.sections.push(ElfSection {
            name: name.to_string(),
            sh_type: SHT_NOBITS,
            addr,
            data: Vec::new(),
            size,
            offset: None,
        });
        self
    }

    /// A PROGBITS section whose content lies outside the file.
    pub fn dangling(mut self, name: &str, addr: u64, size: u64) -> Self {
        self.sections.push(ElfSection {
            name: name.to_string(),
            sh_type: SHT_PROGBITS,
            addr,
            data: Vec::new(),
            size,
            offset: Some(0x00FF_0000),
        });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let w = self.words;
        let ehsize: usize = if w.is_64 { 64 } else { 52 };
        let shentsize: usize = if w.is_64 { 64 } else { 40 };

        let mut shstrtab = vec![0u8];
        let mut name_offsets = Vec::new();
        for s in &self.sections {
            name_offsets.push(shstrtab.len() as u32);
            shstrtab.extend_from_slice(s.name.as_bytes());
            shstrtab.push(0);
        }
        let shstrtab_name = shstrtab.len() as u32;
        shstrtab.extend_from_slice(b".shstrtab\0");

        let mut out = vec![0u8; ehsize];
        let mut offsets = Vec::new();
        for s in &self.sections {
            align(&mut out, 8);
            offsets.push(s.offset.unwrap_or(out.len() as u64));
            out.extend_from_slice(&s.data);
        }
        align(&mut out, 8);
        let shstrtab_offset = out.len() as u64;
        out.extend_from_slice(&shstrtab);
        align(&mut out, 8);
        let shoff = out.len() as u64;

        // SHT_NULL
        out.extend(std::iter::repeat(0u8).take(shentsize));
        for (i, s) in self.sections.iter().enumerate() {
            Self::shdr(w, &mut out, name_offsets[i], s.sh_type, s.addr, offsets[i], s.size);
        }
        Self::shdr(
            w,
            &mut out,
            shstrtab_name,
            SHT_STRTAB,
            0,
            shstrtab_offset,
            shstrtab.len() as u64,
        );

        let shnum = (self.sections.len() + 2) as u16;
        let mut header = Vec::with_capacity(ehsize);
        header.extend_from_slice(&[0x7f, b'E', b'L', b'F']);
        header.push(if w.is_64 { 2 } else { 1 });
        header.push(if w.little { 1 } else { 2 });
        header.push(1);
        header.extend_from_slice(&[0u8; 9]);
        w.u16(&mut header, 1); // ET_REL
        w.u16(&mut header, if w.is_64 { 62 } else { 3 });
        w.u32(&mut header, 1);
        w.addr(&mut header, 0); // e_entry
        w.addr(&mut header, 0); // e_phoff
        w.addr(&mut header, shoff);
        w.u32(&mut header, 0); // e_flags
        w.u16(&mut header, ehsize as u16);
        w.u16(&mut header, if w.is_64 { 56 } else { 32 });
        w.u16(&mut header, 0); // e_phnum
        w.u16(&mut header, shentsize as u16);
        w.u16(&mut header, shnum);
        w.u16(&mut header, shnum - 1);
        out[..ehsize].copy_from_slice(&header);

        out
    }

    fn shdr(
        w: Words,
        out: &mut Vec<u8>,
        name: u32,
        sh_type: u32,
        addr: u64,
        offset: u64,
        size: u64,
    ) {
        w.u32(out, name);
        w.u32(out, sh_type);
        w.addr(out, 0); // sh_flags
        w.addr(out, addr);
        w.addr(out, offset);
        w.addr(out, size);
        w.u32(out, 0); // sh_link
        w.u32(out, 0); // sh_info
        w.addr(out, 1); // sh_addralign
        w.addr(out, 0); // sh_entsize
    }
}

pub const CPU_TYPE_X86: u32 = 7;
pub const CPU_TYPE_X86_64: u32 = 0x0100_0007;
pub const CPU_TYPE_ARM64: u32 = 0x0100_000C;
pub const CPU_TYPE_POWERPC: u32 = 18;
pub const S_REGULAR: u32 = 0;
pub const S_ZEROFILL: u32 = 1;

struct MachSection {
    name: String,
    addr: u64,
    data: Vec<u8>,
    size: u64,
    flags: u32,
}

/// Builds a little-endian Mach-O image with one segment.
pub struct MachOBuilder {
    cputype: u32,
    is_64: bool,
    sections: Vec<MachSection>,
}

impl MachOBuilder {
    pub fn new(cputype: u32, is_64: bool) -> Self {
        Self {
            cputype,
            is_64,
            sections: Vec::new(),
        }
    }

    pub fn section(mut self, name: &str, addr: u64, data: &[u8]) -> Self {
        self.sections.push(MachSection {
            name: name.to_string(),
            addr,
            data: data.to_vec(),
            size: data.len() as u64,
            flags: S_REGULAR,
        });
        self
    }

    pub fn zerofill(mut self, name: &str, addr: u64, size: u64) -> Self {
        self.sections.push(MachSection {
            name: name.to_string(),
            addr,
            data: Vec::new(),
            size,
            flags: S_ZEROFILL,
        });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let w = Words {
            is_64: self.is_64,
            little: true,
        };
        let header_size: usize = if self.is_64 { 32 } else { 28 };
        let seg_size: usize = if self.is_64 { 72 } else { 56 };
        let sect_size: usize = if self.is_64 { 80 } else { 68 };
        let cmdsize = seg_size + sect_size * self.sections.len();

        // Section contents follow the load commands
        let mut data_offset = header_size + cmdsize;
        data_offset += (8 - data_offset % 8) % 8;
        let mut offsets = Vec::new();
        let mut payload = Vec::new();
        for s in &self.sections {
            align(&mut payload, 8);
            offsets.push((data_offset + payload.len()) as u32);
            payload.extend_from_slice(&s.data);
        }

        let vmaddr = self.sections.iter().map(|s| s.addr).min().unwrap_or(0);
        let vmend = self
            .sections
            .iter()
            .map(|s| s.addr + s.size)
            .max()
            .unwrap_or(0);

        let mut out = Vec::new();
        w.u32(&mut out, if self.is_64 { 0xFEED_FACF } else { 0xFEED_FACE });
        w.u32(&mut out, self.cputype);
        w.u32(&mut out, 3); // cpusubtype
        w.u32(&mut out, 2); // MH_EXECUTE
        w.u32(&mut out, 1); // ncmds
        w.u32(&mut out, cmdsize as u32);
        w.u32(&mut out, 0); // flags
        if self.is_64 {
            w.u32(&mut out, 0); // reserved
        }

        w.u32(&mut out, if self.is_64 { 0x19 } else { 0x1 });
        w.u32(&mut out, cmdsize as u32);
        name16(&mut out, "__DATA");
        w.addr(&mut out, vmaddr);
        w.addr(&mut out, vmend - vmaddr);
        w.addr(&mut out, data_offset as u64);
        w.addr(&mut out, payload.len() as u64);
        w.u32(&mut out, 3); // maxprot
        w.u32(&mut out, 3); // initprot
        w.u32(&mut out, self.sections.len() as u32);
        w.u32(&mut out, 0);

        for (i, s) in self.sections.iter().enumerate() {
            name16(&mut out, &s.name);
            name16(&mut out, "__DATA");
            w.addr(&mut out, s.addr);
            w.addr(&mut out, s.size);
            w.u32(&mut out, if s.flags == S_ZEROFILL { 0 } else { offsets[i] });
            w.u32(&mut out, 0); // align
            w.u32(&mut out, 0); // reloff
            w.u32(&mut out, 0); // nreloc
            w.u32(&mut out, s.flags);
            w.u32(&mut out, 0);
            w.u32(&mut out, 0);
            if self.is_64 {
                w.u32(&mut out, 0);
            }
        }

        align(&mut out, 8);
        out.extend_from_slice(&payload);
        out
    }
}
