use super::*;

/// Make the compute functions of an impl block discoverable.
pub fn expand(block: &syn::ItemImpl) -> Result<proc_macro2::TokenStream> {
    if let Some((_, path, _)) = &block.trait_ {
        bail!(path, "`computed` can only be applied to inherent impl blocks");
    }

    for param in block.generics.params.iter() {
        bail!(param, "computed impl blocks cannot be generic")
    }

    // Preprocess and validate the compute functions.
    let mut functions = vec![];
    for item in &block.items {
        let syn::ImplItem::Fn(function) = item else { continue };
        if is_candidate(&function.sig) {
            functions.push(prepare_function(&function.sig)?);
        }
    }

    let ty = block.self_ty.as_ref();
    let entries = functions.iter().map(create_entry);

    Ok(quote! {
        #block

        impl ::recompute::Computed for #ty {
            fn compute_functions() -> ::std::vec::Vec<::recompute::ComputeFunction<Self>> {
                ::std::vec![#(#entries),*]
            }
        }
    })
}

/// Details about a function that may compute an attribute.
struct Function {
    name: syn::Ident,
    args: Vec<syn::Ident>,
    types: Vec<syn::Type>,
    fallible: bool,
}

/// Whether a member is a compute function.
///
/// The name must be `compute<Token>Attribute` or `compute_<token>_attribute`
/// with a non-empty token. Other members, including helpers that merely start
/// with `compute`, are left alone.
fn is_candidate(sig: &syn::Signature) -> bool {
    if sig.receiver().is_some() {
        return false;
    }

    let name = sig.ident.to_string();
    let Some(rest) = name.strip_prefix("compute") else { return false };
    match rest.strip_prefix('_') {
        Some(rest) => rest.strip_suffix("_attribute").is_some_and(|token| !token.is_empty()),
        None => rest.strip_suffix("Attribute").is_some_and(|token| !token.is_empty()),
    }
}

/// Preprocess and validate a compute function signature.
fn prepare_function(sig: &syn::Signature) -> Result<Function> {
    if let Some(unsafety) = sig.unsafety {
        bail!(unsafety, "compute functions cannot be unsafe");
    }

    if let Some(asyncness) = sig.asyncness {
        bail!(asyncness, "compute functions cannot be async");
    }

    if let Some(constness) = sig.constness {
        bail!(constness, "compute functions cannot be const");
    }

    for param in sig.generics.params.iter() {
        bail!(param, "compute functions cannot be generic")
    }

    let mut args = vec![];
    let mut types = vec![];

    for input in &sig.inputs {
        let syn::FnArg::Typed(typed) = input else { continue };

        let syn::Pat::Ident(syn::PatIdent {
            by_ref: None,
            mutability: None,
            ident,
            subpat: None,
            ..
        }) = typed.pat.as_ref()
        else {
            bail!(typed.pat, "only simple identifiers are supported");
        };

        match typed.ty.as_ref() {
            syn::Type::ImplTrait(ty) => {
                bail!(ty, "compute functions cannot be generic");
            }
            syn::Type::Reference(ty) => {
                bail!(ty, "compute functions must take their dependencies by value");
            }
            _ => {}
        }

        args.push(ident.clone());
        types.push(typed.ty.as_ref().clone());
    }

    Ok(Function {
        name: sig.ident.clone(),
        args,
        types,
        fallible: returns_result(&sig.output),
    })
}

/// Whether the return type is spelled as some `Result`.
fn returns_result(output: &syn::ReturnType) -> bool {
    let syn::ReturnType::Type(_, ty) = output else { return false };
    let syn::Type::Path(path) = ty.as_ref() else { return false };
    path.path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == "Result")
}

/// Produce the `ComputeFunction` entry for a function.
fn create_entry(function: &Function) -> proc_macro2::TokenStream {
    let name = &function.name;
    let label = name.to_string();
    let args = &function.args;
    let types = &function.types;
    let params: Vec<String> = args.iter().map(ToString::to_string).collect();
    let arity = args.len();
    let positions = 0..arity;

    let call = if function.fallible {
        quote! {
            Self::#name(#(#args),*).map_err(|err| {
                ::recompute::internal::invocation(#label, err)
            })?
        }
    } else {
        quote! { Self::#name(#(#args),*) }
    };

    quote! {
        ::recompute::ComputeFunction::<Self>::new(
            #label,
            &[#(#params),*],
            |__recompute_values: ::std::vec::Vec<<Self as ::recompute::Record>::Value>|
             -> ::std::result::Result<<Self as ::recompute::Record>::Value, ::recompute::Error> {
                ::recompute::internal::arity(#label, #arity, __recompute_values.len())?;
                #[allow(unused_mut, unused_variables)]
                let mut __recompute_values = __recompute_values.into_iter();
                #(
                    let #args: #types = ::recompute::internal::argument(
                        #label,
                        #params,
                        #positions,
                        &mut __recompute_values,
                    )?;
                )*
                let __recompute_output = #call;
                ::std::result::Result::Ok(
                    ::recompute::internal::output::<Self, _>(__recompute_output)
                )
            },
        )
    }
}
